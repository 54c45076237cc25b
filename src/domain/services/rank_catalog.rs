//! Default rank seeding and rank lookups.

use tracing::debug;

use crate::domain::entities::{Rank, RankRepository};
use crate::domain::value_objects::RankLevel;
use crate::shared::error::AppError;

/// Ids of the three ranks seeded for a new guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRanks {
    pub leader: i64,
    pub vice_leader: i64,
    pub member: i64,
}

/// Domain service owning the per-guild rank set.
pub struct RankCatalog;

impl RankCatalog {
    /// Insert Leader, Vice Leader and Member for a freshly created guild.
    pub async fn seed_default_ranks<S>(store: &mut S, guild_id: i64) -> Result<DefaultRanks, AppError>
    where
        S: RankRepository,
    {
        let mut ids = [0i64; 3];
        for (slot, level) in ids.iter_mut().zip(RankLevel::ALL) {
            let rank = store
                .insert_rank(guild_id, level.default_name(), level.as_i32())
                .await?;
            *slot = rank.id;
        }
        debug!(guild_id, "Seeded default ranks");

        let [leader, vice_leader, member] = ids;
        Ok(DefaultRanks {
            leader,
            vice_leader,
            member,
        })
    }

    /// Ranks of a guild, highest level first.
    pub async fn list_ranks<S>(store: &mut S, guild_id: i64) -> Result<Vec<Rank>, AppError>
    where
        S: RankRepository,
    {
        store.list_ranks(guild_id).await
    }

    /// The rank new members are assigned.
    ///
    /// A guild without ranks breaks the seeding invariant and is reported
    /// as an internal error.
    pub async fn lowest_rank<S>(store: &mut S, guild_id: i64) -> Result<Rank, AppError>
    where
        S: RankRepository,
    {
        store
            .lowest_rank(guild_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Guild {guild_id} has no ranks")))
    }
}

