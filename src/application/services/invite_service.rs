//! Invite Service
//!
//! Inviting characters, accepting invites, and listing an account's invites.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::config::GuildSettings;
use crate::domain::services::{select_invite, AuthorizationPolicy, InviteQueue};
use crate::domain::{AccountInvite, GuildRepository, Invite};
use crate::infrastructure::database::{StoreSession, UnitOfWork};
use crate::infrastructure::metrics::record_guild_operation;
use crate::shared::deadline::with_deadline;
use crate::shared::error::AppError;

/// Invite service trait
#[async_trait]
pub trait InviteService: Send + Sync {
    /// Invite a character to a guild; requires Vice Leader or above
    async fn invite_player(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<InviteDto, AppError>;

    /// Accept a pending invite for one of the caller's characters
    async fn accept_invite(
        &self,
        account_id: i64,
        guild_name: &str,
        character_name: Option<&str>,
    ) -> Result<AcceptedInviteDto, AppError>;

    /// Pending invites across all of the caller's characters
    async fn pending_invites(&self, account_id: i64) -> Result<Vec<AccountInvite>, AppError>;
}

/// A recorded invite
#[derive(Debug, Clone)]
pub struct InviteDto {
    pub guild_id: i64,
    pub guild_name: String,
    pub character_name: String,
    pub invite: Invite,
}

/// Result of accepting an invite
#[derive(Debug, Clone)]
pub struct AcceptedInviteDto {
    pub guild_id: i64,
    pub guild_name: String,
    pub character_id: i64,
    pub character_name: String,
    pub rank_id: i64,
}

/// InviteService implementation
pub struct InviteServiceImpl<U>
where
    U: UnitOfWork,
{
    uow: Arc<U>,
    settings: GuildSettings,
}

impl<U> InviteServiceImpl<U>
where
    U: UnitOfWork,
{
    pub fn new(uow: Arc<U>, settings: GuildSettings) -> Self {
        Self { uow, settings }
    }

    #[instrument(skip(self))]
    async fn invite(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<InviteDto, AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.begin().await?;

            let guild = session
                .find_guild_by_name(guild_name.trim())
                .await?
                .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))?;

            let rank = AuthorizationPolicy::effective_rank(&mut session, account_id, &guild).await?;
            AuthorizationPolicy::require_invite(rank)?;

            let (target, invite) = InviteQueue::create(&mut session, guild.id, player_name.trim()).await?;

            session.commit().await?;
            info!(guild_id = guild.id, character_id = target.id, "Player invited");

            Ok(InviteDto {
                guild_id: guild.id,
                guild_name: guild.name,
                character_name: target.name,
                invite,
            })
        })
        .await
    }

    #[instrument(skip(self))]
    async fn accept(
        &self,
        account_id: i64,
        guild_name: &str,
        character_name: Option<&str>,
    ) -> Result<AcceptedInviteDto, AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.begin().await?;

            let guild = session
                .find_guild_by_name(guild_name.trim())
                .await?
                .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))?;

            let pending = InviteQueue::pending_in_guild(&mut session, guild.id, account_id).await?;
            let (character_id, character_name) = select_invite(&pending, character_name.map(str::trim))
                .map(|i| (i.character_id, i.character_name.clone()))
                .ok_or_else(|| AppError::NotFound("No pending invite found".to_string()))?;

            let rank_id = InviteQueue::accept(&mut session, character_id, guild.id).await?;

            session.commit().await?;
            info!(guild_id = guild.id, character_id, rank_id, "Invite accepted");

            Ok(AcceptedInviteDto {
                guild_id: guild.id,
                guild_name: guild.name,
                character_id,
                character_name,
                rank_id,
            })
        })
        .await
    }

    #[instrument(skip(self), level = "debug")]
    async fn pending(&self, account_id: i64) -> Result<Vec<AccountInvite>, AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.connect().await?;
            InviteQueue::list_pending_for_account(&mut session, account_id).await
        })
        .await
    }
}

#[async_trait]
impl<U> InviteService for InviteServiceImpl<U>
where
    U: UnitOfWork,
{
    async fn invite_player(&self, account_id: i64, guild_name: &str, player_name: &str) -> Result<InviteDto, AppError> {
        let started = Instant::now();
        let result = self.invite(account_id, guild_name, player_name).await;
        record_guild_operation("invite_player", started, &result);
        result
    }

    async fn accept_invite(
        &self,
        account_id: i64,
        guild_name: &str,
        character_name: Option<&str>,
    ) -> Result<AcceptedInviteDto, AppError> {
        let started = Instant::now();
        let result = self.accept(account_id, guild_name, character_name).await;
        record_guild_operation("accept_invite", started, &result);
        result
    }

    async fn pending_invites(&self, account_id: i64) -> Result<Vec<AccountInvite>, AppError> {
        let started = Instant::now();
        let result = self.pending(account_id).await;
        record_guild_operation("pending_invites", started, &result);
        result
    }
}
