//! Membership Service
//!
//! Leaving a guild and kicking members.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::config::GuildSettings;
use crate::domain::services::{AuthorizationPolicy, MembershipStore};
use crate::domain::{CharacterDirectory, Guild, GuildRepository, MembershipRepository};
use crate::infrastructure::database::{StoreSession, UnitOfWork};
use crate::infrastructure::metrics::record_guild_operation;
use crate::shared::deadline::with_deadline;
use crate::shared::error::AppError;

/// Membership service trait
#[async_trait]
pub trait MembershipService: Send + Sync {
    /// Remove one of the caller's non-owner characters from a guild
    async fn leave_guild(
        &self,
        account_id: i64,
        guild_name: &str,
        character_name: Option<&str>,
    ) -> Result<(), AppError>;

    /// Remove a member; requires Vice Leader or above
    async fn kick_player(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<(), AppError>;
}

/// MembershipService implementation
pub struct MembershipServiceImpl<U>
where
    U: UnitOfWork,
{
    uow: Arc<U>,
    settings: GuildSettings,
}

async fn find_guild<S>(session: &mut S, name: &str) -> Result<Guild, AppError>
where
    S: GuildRepository,
{
    session
        .find_guild_by_name(name.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))
}

impl<U> MembershipServiceImpl<U>
where
    U: UnitOfWork,
{
    pub fn new(uow: Arc<U>, settings: GuildSettings) -> Self {
        Self { uow, settings }
    }

    #[instrument(skip(self))]
    async fn leave(&self, account_id: i64, guild_name: &str, character_name: Option<&str>) -> Result<(), AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.begin().await?;
            let guild = find_guild(&mut session, guild_name).await?;

            let caller_owns = session
                .find_character(guild.owner_id)
                .await?
                .is_some_and(|owner| owner.belongs_to(account_id));
            let members = session.account_members(account_id, guild.id).await?;
            let character_id = AuthorizationPolicy::leave_candidate(
                &guild,
                caller_owns,
                &members,
                character_name.map(str::trim),
            )?;

            MembershipStore::remove(&mut session, &guild, character_id).await?;

            session.commit().await?;
            info!(guild_id = guild.id, character_id, "Member left guild");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn kick(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<(), AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.begin().await?;
            let guild = find_guild(&mut session, guild_name).await?;

            let rank = AuthorizationPolicy::effective_rank(&mut session, account_id, &guild).await?;
            AuthorizationPolicy::require_kick(rank)?;

            let target = session
                .find_character_by_name(player_name.trim())
                .await?
                .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;
            AuthorizationPolicy::ensure_not_owner(&guild, &target)?;

            MembershipStore::remove(&mut session, &guild, target.id).await?;

            session.commit().await?;
            info!(guild_id = guild.id, character_id = target.id, "Member kicked");
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl<U> MembershipService for MembershipServiceImpl<U>
where
    U: UnitOfWork,
{
    async fn leave_guild(
        &self,
        account_id: i64,
        guild_name: &str,
        character_name: Option<&str>,
    ) -> Result<(), AppError> {
        let started = Instant::now();
        let result = self.leave(account_id, guild_name, character_name).await;
        record_guild_operation("leave_guild", started, &result);
        result
    }

    async fn kick_player(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<(), AppError> {
        let started = Instant::now();
        let result = self.kick(account_id, guild_name, player_name).await;
        record_guild_operation("kick_player", started, &result);
        result
    }
}
