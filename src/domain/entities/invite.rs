//! Guild invite entity and repository trait.
//!
//! Maps to the `guild_invites` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A pending offer for a character to join a guild.
///
/// Maps to the `guild_invites` table:
/// - player_id: BIGINT NOT NULL REFERENCES players(id) (composite PK)
/// - guild_id: BIGINT NOT NULL REFERENCES guilds(id) (composite PK)
/// - invited_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub character_id: i64,
    pub guild_id: i64,
    pub invited_at: DateTime<Utc>,
}

impl Invite {
    /// Create an invite timestamped now.
    pub fn new(character_id: i64, guild_id: i64) -> Self {
        Self {
            character_id,
            guild_id,
            invited_at: Utc::now(),
        }
    }
}

/// A pending invite of a guild, joined with the invited character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInviteEntry {
    pub character_id: i64,
    pub character_name: String,
    pub level: i32,
    pub vocation: i32,
    pub invited_at: DateTime<Utc>,
}

/// A pending invite addressed to one of an account's characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInvite {
    pub guild_id: i64,
    pub guild_name: String,
    pub guild_level: i32,
    pub guild_points: i32,
    pub character_id: i64,
    pub character_name: String,
    pub invited_at: DateTime<Utc>,
}

/// Repository trait for Invite data access operations.
#[async_trait]
pub trait InviteRepository: Send {
    /// Check whether an invite exists for the pair.
    async fn invite_exists(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError>;

    /// Insert an invite.
    ///
    /// A duplicate pair surfaces as `AppError::Conflict`.
    async fn insert_invite(&mut self, invite: &Invite) -> Result<(), AppError>;

    /// Delete the invite for the pair; returns whether a row was removed.
    async fn delete_invite(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError>;

    /// Pending invites of a guild, newest first.
    async fn list_guild_invites(&mut self, guild_id: i64) -> Result<Vec<GuildInviteEntry>, AppError>;

    /// Pending invites for all characters of an account, newest first.
    async fn list_account_invites(&mut self, account_id: i64) -> Result<Vec<AccountInvite>, AppError>;
}
