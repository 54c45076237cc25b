//! Membership rules: one guild per character, owner rows are permanent,
//! and roster ordering.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::domain::entities::{
    CharacterDirectory, Guild, GuildRepository, Membership, MembershipRepository, RosterEntry,
};
use crate::domain::value_objects::{RankLevel, OWNER_RANK_LEVEL};
use crate::shared::error::AppError;

/// Domain service owning the character to guild relation.
pub struct MembershipStore;

impl MembershipStore {
    /// Add a character to a guild with the given rank.
    ///
    /// Fails with Conflict when the character already belongs to any guild
    /// or owns a guild other than `guild_id`. The founder is added to the
    /// guild it owns right after the guild row is inserted.
    pub async fn add<S>(store: &mut S, character_id: i64, guild_id: i64, rank_id: i64) -> Result<(), AppError>
    where
        S: MembershipRepository + GuildRepository,
    {
        if store.find_membership(character_id).await?.is_some() {
            return Err(AppError::Conflict(
                "Character is already a member of a guild".to_string(),
            ));
        }

        if let Some(owned) = store.find_guild_by_owner(character_id).await? {
            if owned.id != guild_id {
                return Err(AppError::Conflict("Character already owns a guild".to_string()));
            }
        }

        store
            .insert_membership(&Membership::new(character_id, guild_id, rank_id))
            .await?;
        debug!(character_id, guild_id, rank_id, "Membership added");
        Ok(())
    }

    /// Remove a non-owner character from a guild.
    ///
    /// The owner's row is never deleted (Forbidden). A character without a
    /// row in this guild yields NotFound.
    pub async fn remove<S>(store: &mut S, guild: &Guild, character_id: i64) -> Result<(), AppError>
    where
        S: MembershipRepository,
    {
        if guild.is_owner(character_id) {
            return Err(AppError::Forbidden(
                "The guild owner cannot be removed from the guild".to_string(),
            ));
        }

        if !store.delete_membership(character_id, guild.id).await? {
            return Err(AppError::NotFound(
                "Character is not a member of this guild".to_string(),
            ));
        }
        debug!(character_id, guild_id = guild.id, "Membership removed");
        Ok(())
    }

    /// Stored rank level of a character in a guild, 0 when not a member.
    pub async fn rank_level_of<S>(store: &mut S, character_id: i64, guild_id: i64) -> Result<i32, AppError>
    where
        S: MembershipRepository,
    {
        Ok(store
            .membership_rank_level(character_id, guild_id)
            .await?
            .unwrap_or(0))
    }

    /// Sorted roster of a guild.
    ///
    /// An owner without a membership row is shown as Leader, ranked above
    /// every stored rank.
    pub async fn list_members<S>(store: &mut S, guild: &Guild) -> Result<Vec<RosterEntry>, AppError>
    where
        S: MembershipRepository + CharacterDirectory,
    {
        let mut roster = store.list_roster(guild.id).await?;

        if !roster.iter().any(|m| guild.is_owner(m.character_id)) {
            match store.find_character(guild.owner_id).await? {
                Some(owner) => {
                    warn!(guild_id = guild.id, owner_id = owner.id, "Owner has no membership row");
                    let online = store.is_online(owner.id).await?;
                    roster.push(RosterEntry {
                        character_id: owner.id,
                        name: owner.name,
                        level: owner.level,
                        vocation: owner.vocation,
                        rank_name: RankLevel::Leader.default_name().to_string(),
                        rank_level: OWNER_RANK_LEVEL,
                        nick: String::new(),
                        online,
                    });
                }
                None => warn!(guild_id = guild.id, owner_id = guild.owner_id, "Owner character missing"),
            }
        }

        sort_roster(&mut roster);
        Ok(roster)
    }
}

/// Order by rank level desc, character level desc, then name ignoring case.
pub fn sort_roster(roster: &mut [RosterEntry]) {
    roster.sort_by(roster_order);
}

fn roster_order(a: &RosterEntry, b: &RosterEntry) -> Ordering {
    b.rank_level
        .cmp(&a.rank_level)
        .then_with(|| b.level.cmp(&a.level))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}
