//! # Domain Layer
//!
//! Guild rules independent of HTTP and storage.
//!
//! ## Structure
//!
//! - **entities**: Guild, Rank, Membership, Invite, Character and their repository traits
//! - **value_objects**: RankLevel, EffectiveRank, GuildName, PageRequest
//! - **services**: RankCatalog, MembershipStore, InviteQueue, AuthorizationPolicy
//!
//! Domain services are stateless and generic over the repository traits,
//! so they run unchanged inside a Postgres transaction or an in-memory store.

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
