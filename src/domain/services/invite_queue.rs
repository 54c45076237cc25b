//! Pending guild invites.

use tracing::debug;

use crate::domain::entities::{
    AccountInvite, Character, CharacterDirectory, GuildRepository, Invite, InviteRepository,
    MembershipRepository, RankRepository,
};
use crate::domain::services::{MembershipStore, RankCatalog};
use crate::shared::error::AppError;

/// Domain service owning the invite queue of every guild.
pub struct InviteQueue;

impl InviteQueue {
    /// Record an invite for the named character.
    ///
    /// NotFound when no character has that name. Conflict when the
    /// character already belongs to or owns a guild, or is already invited
    /// to this one.
    pub async fn create<S>(store: &mut S, guild_id: i64, character_name: &str) -> Result<(Character, Invite), AppError>
    where
        S: CharacterDirectory + MembershipRepository + GuildRepository + InviteRepository,
    {
        let target = store
            .find_character_by_name(character_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;

        if store.find_membership(target.id).await?.is_some() {
            return Err(AppError::Conflict(
                "Character is already a member of a guild".to_string(),
            ));
        }

        if store.find_guild_by_owner(target.id).await?.is_some() {
            return Err(AppError::Conflict("Character already owns a guild".to_string()));
        }

        if store.invite_exists(target.id, guild_id).await? {
            return Err(AppError::Conflict(
                "Character already has a pending invite to this guild".to_string(),
            ));
        }

        let invite = Invite::new(target.id, guild_id);
        store.insert_invite(&invite).await?;
        debug!(character_id = target.id, guild_id, "Invite recorded");

        Ok((target, invite))
    }

    /// Turn a pending invite into a membership at the guild's lowest rank.
    ///
    /// Returns the assigned rank id. NotFound when no invite exists for the pair.
    pub async fn accept<S>(store: &mut S, character_id: i64, guild_id: i64) -> Result<i64, AppError>
    where
        S: InviteRepository + MembershipRepository + GuildRepository + RankRepository,
    {
        if !store.invite_exists(character_id, guild_id).await? {
            return Err(AppError::NotFound("No pending invite found".to_string()));
        }

        let rank = RankCatalog::lowest_rank(store, guild_id).await?;
        MembershipStore::add(store, character_id, guild_id, rank.id).await?;
        store.delete_invite(character_id, guild_id).await?;
        debug!(character_id, guild_id, rank_id = rank.id, "Invite accepted");

        Ok(rank.id)
    }

    /// Invites addressed to any character of an account, newest first.
    pub async fn list_pending_for_account<S>(store: &mut S, account_id: i64) -> Result<Vec<AccountInvite>, AppError>
    where
        S: InviteRepository,
    {
        store.list_account_invites(account_id).await
    }

    /// Invites of an account for one guild, newest first.
    pub async fn pending_in_guild<S>(
        store: &mut S,
        guild_id: i64,
        account_id: i64,
    ) -> Result<Vec<AccountInvite>, AppError>
    where
        S: InviteRepository,
    {
        let mut invites = store.list_account_invites(account_id).await?;
        invites.retain(|i| i.guild_id == guild_id);
        Ok(invites)
    }

    /// Whether any character of the account is invited to the guild.
    pub async fn has_pending<S>(store: &mut S, guild_id: i64, account_id: i64) -> Result<bool, AppError>
    where
        S: InviteRepository,
    {
        Ok(!Self::pending_in_guild(store, guild_id, account_id)
            .await?
            .is_empty())
    }
}

/// Pick the invite to accept from an account's invites for one guild.
///
/// With a character name only that character's invite qualifies;
/// otherwise the first (newest) invite wins.
pub fn select_invite<'a>(
    invites: &'a [AccountInvite],
    character_name: Option<&str>,
) -> Option<&'a AccountInvite> {
    match character_name {
        Some(name) => invites
            .iter()
            .find(|i| i.character_name.eq_ignore_ascii_case(name)),
        None => invites.first(),
    }
}
