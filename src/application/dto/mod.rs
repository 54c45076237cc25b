//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod invite;
pub mod request;
pub mod response;

pub use invite::PendingInviteResponse;
pub use request::{CharacterSelectionRequest, CreateGuildRequest, ListGuildsQuery, PlayerNameRequest};
pub use response::{
    CreateGuildResponse, GuildDetailsResponse, GuildListResponse, MessageResponse,
};
