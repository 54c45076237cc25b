//! Guild rank entity and repository trait.
//!
//! Maps to the `guild_ranks` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RankLevel;
use crate::shared::error::AppError;

/// A guild-scoped rank.
///
/// Maps to the `guild_ranks` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - guild_id: BIGINT NOT NULL REFERENCES guilds(id)
/// - name: VARCHAR(32) NOT NULL
/// - level: INTEGER NOT NULL, unique per guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub id: i64,
    pub guild_id: i64,
    pub name: String,
    /// Stored ordinal, higher means more authority
    pub level: i32,
}

impl Rank {
    /// Typed level of this rank.
    pub fn rank_level(&self) -> RankLevel {
        RankLevel::from_stored(self.level)
    }
}

/// Repository trait for Rank data access operations.
#[async_trait]
pub trait RankRepository: Send {
    /// Insert a rank for a guild.
    async fn insert_rank(&mut self, guild_id: i64, name: &str, level: i32) -> Result<Rank, AppError>;

    /// All ranks of a guild, highest level first.
    async fn list_ranks(&mut self, guild_id: i64) -> Result<Vec<Rank>, AppError>;

    /// The rank with the lowest level in a guild.
    async fn lowest_rank(&mut self, guild_id: i64) -> Result<Option<Rank>, AppError>;
}
