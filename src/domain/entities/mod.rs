//! # Domain Entities
//!
//! Guild subsystem entities. All entities except [`Character`] map to tables
//! owned by this service; characters are read from the account service's
//! `players` table.
//!
//! ## Entities
//!
//! - **Guild**: a named group owned by one character
//! - **Rank**: a guild-scoped authority level
//! - **Membership**: a character's relation to the guild it belongs to
//! - **Invite**: a pending offer for a character to join a guild
//! - **Character**: a player character (read-only)
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait. A store session
//! implements all of them so one transaction can span several.

mod character;
mod guild;
mod invite;
mod membership;
mod rank;

pub use character::{Character, CharacterDirectory};
pub use guild::{Guild, GuildListQuery, GuildRepository, GuildSummary, NewGuild};
pub use invite::{AccountInvite, GuildInviteEntry, Invite, InviteRepository};
pub use membership::{AccountMember, Membership, MembershipRepository, RosterEntry};
pub use rank::{Rank, RankRepository};
