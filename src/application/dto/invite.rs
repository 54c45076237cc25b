//! Invite DTOs
//!
//! Data Transfer Objects for invite-related API operations.

use serde::Serialize;

use crate::domain::AccountInvite;

/// A pending invite addressed to one of the caller's characters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingInviteResponse {
    pub guild_id: i64,
    pub guild_name: String,
    pub guild_level: i32,
    pub guild_points: i32,
    /// Invited character
    pub player_name: String,
    /// Unix seconds
    pub invite_date: i64,
}

impl From<AccountInvite> for PendingInviteResponse {
    fn from(invite: AccountInvite) -> Self {
        Self {
            guild_id: invite.guild_id,
            guild_name: invite.guild_name,
            guild_level: invite.guild_level,
            guild_points: invite.guild_points,
            player_name: invite.character_name,
            invite_date: invite.invited_at.timestamp(),
        }
    }
}
