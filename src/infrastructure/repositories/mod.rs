//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! Every trait is implemented on [`PgSession`](crate::infrastructure::database::PgSession),
//! so one session serves all repositories of an operation and its
//! transaction covers every read and write.
//!
//! ## Available Repositories
//!
//! - **GuildRepository** - guild rows, lookup and paged listing
//! - **RankRepository** - per-guild ranks
//! - **MembershipRepository** - memberships and rosters
//! - **InviteRepository** - pending invites
//! - **CharacterDirectory** - read-only character and presence lookups

mod character_repository;
mod guild_repository;
mod invite_repository;
mod membership_repository;
mod rank_repository;
