//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **RankLevel / EffectiveRank**: typed rank ordering used by authorization
//! - **GuildName**: validated guild name
//! - **PageRequest**: page window for list queries
//! - **vocation_name**: vocation id to display name

mod guild_name;
mod pagination;
mod rank_level;
mod vocation;

pub use guild_name::*;
pub use pagination::*;
pub use rank_level::*;
pub use vocation::*;
