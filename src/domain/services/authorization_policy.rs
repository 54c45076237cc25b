//! Caller authority over a guild and the decisions derived from it.

use crate::domain::entities::{AccountMember, Character, CharacterDirectory, Guild, MembershipRepository};
use crate::domain::value_objects::{EffectiveRank, RankLevel};
use crate::shared::error::AppError;

/// Domain service for guild permission decisions.
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Authority the caller's account holds over the guild.
    pub async fn effective_rank<S>(store: &mut S, account_id: i64, guild: &Guild) -> Result<EffectiveRank, AppError>
    where
        S: CharacterDirectory + MembershipRepository,
    {
        let owner = store.find_character(guild.owner_id).await?;
        let members = store.account_members(account_id, guild.id).await?;
        Ok(Self::rank_from(account_id, owner.as_ref(), &members))
    }

    /// Owner beats any membership row; otherwise the highest stored rank of
    /// the account's member characters.
    pub fn rank_from(account_id: i64, owner: Option<&Character>, members: &[AccountMember]) -> EffectiveRank {
        if owner.is_some_and(|o| o.belongs_to(account_id)) {
            return EffectiveRank::Owner;
        }

        members
            .iter()
            .map(|m| RankLevel::from_stored(m.rank_level))
            .max()
            .map_or(EffectiveRank::None, EffectiveRank::Member)
    }

    /// Owner or Vice Leader and above.
    pub fn can_invite(rank: EffectiveRank) -> bool {
        rank.at_least(RankLevel::ViceLeader)
    }

    /// Same threshold as inviting.
    pub fn can_kick(rank: EffectiveRank) -> bool {
        Self::can_invite(rank)
    }

    /// Reject callers that may not invite.
    pub fn require_invite(rank: EffectiveRank) -> Result<(), AppError> {
        if Self::can_invite(rank) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have permission to invite players to this guild".to_string(),
            ))
        }
    }

    /// Reject callers that may not kick.
    pub fn require_kick(rank: EffectiveRank) -> Result<(), AppError> {
        if Self::can_kick(rank) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have permission to kick players from this guild".to_string(),
            ))
        }
    }

    /// The guild owner can never be kicked, whatever the caller's rank.
    pub fn ensure_not_owner(guild: &Guild, target: &Character) -> Result<(), AppError> {
        if guild.is_owner(target.id) {
            return Err(AppError::Forbidden("The guild owner cannot be kicked".to_string()));
        }
        Ok(())
    }

    /// Choose which of the caller's characters leaves the guild.
    ///
    /// Only a non-owner member may leave. `caller_owns` tells whether the
    /// owner character belongs to the caller's account.
    pub fn leave_candidate(
        guild: &Guild,
        caller_owns: bool,
        members: &[AccountMember],
        character_name: Option<&str>,
    ) -> Result<i64, AppError> {
        let owner_cannot_leave =
            || AppError::Forbidden("The guild owner cannot leave the guild".to_string());
        let not_member = || AppError::Forbidden("You are not a member of this guild".to_string());

        if let Some(name) = character_name {
            let member = members
                .iter()
                .find(|m| m.character_name.eq_ignore_ascii_case(name))
                .ok_or_else(not_member)?;
            if guild.is_owner(member.character_id) {
                return Err(owner_cannot_leave());
            }
            return Ok(member.character_id);
        }

        let leavers: Vec<&AccountMember> = members
            .iter()
            .filter(|m| !guild.is_owner(m.character_id))
            .collect();

        match leavers.as_slice() {
            [only] => Ok(only.character_id),
            [] if caller_owns => Err(owner_cannot_leave()),
            [] => Err(not_member()),
            _ => Err(AppError::Validation(
                "Several of your characters are in this guild; specify characterName".to_string(),
            )),
        }
    }
}
