//! # Domain Services
//!
//! Stateless guild rules. Each service is generic over the repository
//! traits it needs, so callers pass whatever store session they hold.
//!
//! ## Services
//!
//! - **RankCatalog**: default rank seeding and rank lookups
//! - **MembershipStore**: one-guild-per-character membership and rosters
//! - **InviteQueue**: pending invites and their acceptance
//! - **AuthorizationPolicy**: effective rank and permission decisions

mod authorization_policy;
mod invite_queue;
mod membership_store;
mod rank_catalog;

pub use authorization_policy::*;
pub use invite_queue::*;
pub use membership_store::*;
pub use rank_catalog::*;
