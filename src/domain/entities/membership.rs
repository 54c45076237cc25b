//! Guild membership entity and repository trait.
//!
//! Maps to the `guild_membership` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A character's membership in a guild.
///
/// Maps to the `guild_membership` table:
/// - player_id: BIGINT PRIMARY KEY REFERENCES players(id)
/// - guild_id: BIGINT NOT NULL REFERENCES guilds(id)
/// - rank_id: BIGINT NOT NULL REFERENCES guild_ranks(id)
/// - nick: VARCHAR(15) NOT NULL DEFAULT ''
///
/// `player_id` being the primary key is what keeps a character in at most
/// one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub character_id: i64,
    pub guild_id: i64,
    pub rank_id: i64,
    /// Guild nickname, empty when unset
    pub nick: String,
}

impl Membership {
    /// Create a membership without a nickname.
    pub fn new(character_id: i64, guild_id: i64, rank_id: i64) -> Self {
        Self {
            character_id,
            guild_id,
            rank_id,
            nick: String::new(),
        }
    }
}

/// A member row joined with character, rank and presence data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub character_id: i64,
    pub name: String,
    pub level: i32,
    pub vocation: i32,
    pub rank_name: String,
    pub rank_level: i32,
    pub nick: String,
    pub online: bool,
}

/// One of an account's characters holding a membership row in a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMember {
    pub character_id: i64,
    pub character_name: String,
    pub rank_level: i32,
}

/// Repository trait for Membership data access operations.
#[async_trait]
pub trait MembershipRepository: Send {
    /// Find the membership row of a character in any guild.
    async fn find_membership(&mut self, character_id: i64) -> Result<Option<Membership>, AppError>;

    /// Insert a membership row.
    ///
    /// A character that already has a row surfaces as `AppError::Conflict`.
    async fn insert_membership(&mut self, membership: &Membership) -> Result<(), AppError>;

    /// Delete a character's membership in a guild; returns whether a row was removed.
    async fn delete_membership(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError>;

    /// Stored rank level of a character in a guild, `None` if not a member.
    async fn membership_rank_level(
        &mut self,
        character_id: i64,
        guild_id: i64,
    ) -> Result<Option<i32>, AppError>;

    /// The account's characters that hold a membership row in the guild.
    async fn account_members(&mut self, account_id: i64, guild_id: i64) -> Result<Vec<AccountMember>, AppError>;

    /// Unsorted roster of a guild's membership rows.
    async fn list_roster(&mut self, guild_id: i64) -> Result<Vec<RosterEntry>, AppError>;
}
