//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::{GuildDetails, GuildPage};
use crate::domain::{vocation_name, Guild, GuildInviteEntry, GuildSummary, Rank, RosterEntry};

/// Display name used when a guild owner no longer resolves
const UNKNOWN_OWNER: &str = "Unknown";

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Created guild response
#[derive(Debug, Serialize)]
pub struct CreateGuildResponse {
    pub id: i64,
    pub name: String,
    pub message: String,
}

impl From<Guild> for CreateGuildResponse {
    fn from(guild: Guild) -> Self {
        Self {
            id: guild.id,
            message: format!("Guild {} created", guild.name),
            name: guild.name,
        }
    }
}

/// One row of the guild list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildListItem {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub owner_name: String,
    pub member_count: i64,
    pub points: i32,
}

impl From<GuildSummary> for GuildListItem {
    fn from(summary: GuildSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            level: summary.level,
            owner_name: summary
                .owner_name
                .unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
            member_count: summary.member_count,
            points: summary.points,
        }
    }
}

/// Page metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Guild list response
#[derive(Debug, Serialize)]
pub struct GuildListResponse {
    pub guilds: Vec<GuildListItem>,
    pub pagination: PaginationResponse,
}

impl From<GuildPage> for GuildListResponse {
    fn from(page: GuildPage) -> Self {
        Self {
            pagination: PaginationResponse {
                page: page.page.page,
                limit: page.page.limit,
                total: page.total,
                total_pages: page.page.total_pages(page.total),
            },
            guilds: page.guilds.into_iter().map(GuildListItem::from).collect(),
        }
    }
}

/// Rank shown in the detail view
#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub id: i64,
    pub name: String,
    pub level: i32,
}

impl From<Rank> for RankResponse {
    fn from(rank: Rank) -> Self {
        Self {
            id: rank.id,
            name: rank.name,
            level: rank.level,
        }
    }
}

/// Roster entry shown in the detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub player_id: i64,
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub rank: String,
    pub rank_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    pub status: &'static str,
}

impl From<RosterEntry> for MemberResponse {
    fn from(entry: RosterEntry) -> Self {
        Self {
            player_id: entry.character_id,
            name: entry.name,
            level: entry.level,
            vocation: vocation_name(entry.vocation).to_string(),
            rank: entry.rank_name,
            rank_level: entry.rank_level,
            nick: Some(entry.nick).filter(|n| !n.is_empty()),
            status: if entry.online { "online" } else { "offline" },
        }
    }
}

/// Pending invite shown in the detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildInviteResponse {
    pub player_id: i64,
    pub player_name: String,
    pub level: i32,
    pub vocation: String,
    /// Unix seconds
    pub invite_date: i64,
}

impl From<GuildInviteEntry> for GuildInviteResponse {
    fn from(entry: GuildInviteEntry) -> Self {
        Self {
            player_id: entry.character_id,
            player_name: entry.character_name,
            level: entry.level,
            vocation: vocation_name(entry.vocation).to_string(),
            invite_date: entry.invited_at.timestamp(),
        }
    }
}

/// Guild detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildDetailsResponse {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub owner_name: String,
    /// RFC 3339
    pub created_at: String,
    pub motd: Option<String>,
    pub balance: i64,
    pub points: i32,
    pub level: i32,
    pub ranks: Vec<RankResponse>,
    pub members: Vec<MemberResponse>,
    pub member_count: usize,
    pub pending_invites: Vec<GuildInviteResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_member: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_invite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_pending_invite: Option<bool>,
}

impl From<GuildDetails> for GuildDetailsResponse {
    fn from(details: GuildDetails) -> Self {
        let members: Vec<MemberResponse> = details.members.into_iter().map(MemberResponse::from).collect();
        let guild = details.guild;

        Self {
            id: guild.id,
            name: guild.name,
            owner_id: guild.owner_id,
            owner_name: details
                .owner_name
                .unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
            created_at: guild.created_at.to_rfc3339(),
            motd: guild.motd,
            balance: guild.balance,
            points: guild.points,
            level: guild.level,
            ranks: details.ranks.into_iter().map(RankResponse::from).collect(),
            member_count: members.len(),
            members,
            pending_invites: details
                .invites
                .into_iter()
                .map(GuildInviteResponse::from)
                .collect(),
            is_member: details.viewer.map(|v| v.is_member),
            can_invite: details.viewer.map(|v| v.can_invite),
            has_pending_invite: details.viewer.map(|v| v.has_pending_invite),
        }
    }
}
