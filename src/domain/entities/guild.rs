//! Guild entity and repository trait.
//!
//! Maps to the `guilds` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a guild.
///
/// Maps to the `guilds` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(20) NOT NULL, unique on LOWER(name)
/// - owner_id: BIGINT NOT NULL REFERENCES players(id), unique
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - motd: VARCHAR(255) NULL
/// - balance: BIGINT NOT NULL DEFAULT 0
/// - points: INTEGER NOT NULL DEFAULT 0
/// - level: INTEGER NOT NULL DEFAULT 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    /// Primary key
    pub id: i64,

    /// Guild name (3-20 characters, unique ignoring case)
    pub name: String,

    /// Character id of the founding owner
    pub owner_id: i64,

    /// Guild creation timestamp
    pub created_at: DateTime<Utc>,

    /// Message of the day
    pub motd: Option<String>,

    /// Guild bank balance
    pub balance: i64,

    /// Guild points
    pub points: i32,

    /// Guild level
    pub level: i32,
}

impl Guild {
    /// Check if a character is the owner of this guild.
    pub fn is_owner(&self, character_id: i64) -> bool {
        self.owner_id == character_id
    }
}

/// Values for inserting a new guild; the store assigns id and defaults.
#[derive(Debug, Clone)]
pub struct NewGuild {
    pub name: String,
    pub owner_id: i64,
    pub motd: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of the public guild list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub points: i32,
    /// `None` when the owner character no longer resolves
    pub owner_name: Option<String>,
    /// Distinct members, counting the owner even without a membership row
    pub member_count: i64,
}

/// Filter and window for the guild list.
///
/// Rows are ordered by level desc, points desc, name asc.
#[derive(Debug, Clone, Default)]
pub struct GuildListQuery {
    /// Case-insensitive substring of the guild name
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Repository trait for Guild data access operations.
///
/// Implemented by a store session; calls run inside the session's
/// transaction when it has one.
#[async_trait]
pub trait GuildRepository: Send {
    /// Find a guild by name, ignoring case.
    async fn find_guild_by_name(&mut self, name: &str) -> Result<Option<Guild>, AppError>;

    /// Find the guild owned by a character.
    async fn find_guild_by_owner(&mut self, character_id: i64) -> Result<Option<Guild>, AppError>;

    /// Check whether a guild name is taken, ignoring case.
    async fn guild_name_exists(&mut self, name: &str) -> Result<bool, AppError>;

    /// Insert a new guild.
    ///
    /// A name or owner collision surfaces as `AppError::Conflict`.
    async fn insert_guild(&mut self, guild: &NewGuild) -> Result<Guild, AppError>;

    /// List guild summaries for one page.
    async fn list_guilds(&mut self, query: &GuildListQuery) -> Result<Vec<GuildSummary>, AppError>;

    /// Count guilds matching the search filter.
    async fn count_guilds(&mut self, search: Option<&str>) -> Result<i64, AppError>;
}
