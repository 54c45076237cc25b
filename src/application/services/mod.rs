//! Application Services
//!
//! Services that run guild operations inside a store session and under the
//! configured deadline.
//!
//! ## Available Services
//!
//! - **GuildService**: guild creation, listing and the detail view
//! - **InviteService**: invites, acceptance and pending invites
//! - **MembershipService**: leaving and kicking

pub mod guild_service;
pub mod invite_service;
pub mod membership_service;

// Re-export guild service types
pub use guild_service::{
    CreateGuildDto, GuildDetails, GuildPage, GuildService, GuildServiceImpl, ListGuildsDto, ViewerFlags,
    MAX_MOTD_CHARS,
};

// Re-export invite service types
pub use invite_service::{AcceptedInviteDto, InviteDto, InviteService, InviteServiceImpl};

// Re-export membership service types
pub use membership_service::{MembershipService, MembershipServiceImpl};
