//! Guild Service
//!
//! Guild creation, the public guild list and the guild detail view.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::config::GuildSettings;
use crate::domain::services::{AuthorizationPolicy, InviteQueue, MembershipStore, RankCatalog};
use crate::domain::{
    CharacterDirectory, Guild, GuildInviteEntry, GuildListQuery, GuildName, GuildRepository,
    GuildSummary, InviteRepository, MembershipRepository, NewGuild, PageRequest, Rank, RosterEntry,
    MAX_GUILD_NAME_LEN,
};
use crate::infrastructure::database::{StoreSession, UnitOfWork};
use crate::infrastructure::metrics::record_guild_operation;
use crate::shared::deadline::with_deadline;
use crate::shared::error::AppError;
use crate::shared::validation::sanitize;

/// Longest stored message of the day
pub const MAX_MOTD_CHARS: usize = 255;

/// Guild service trait
#[async_trait]
pub trait GuildService: Send + Sync {
    /// Create a guild founded by one of the caller's characters
    async fn create_guild(&self, account_id: i64, request: CreateGuildDto) -> Result<Guild, AppError>;

    /// List guilds, one page at a time
    async fn list_guilds(&self, query: ListGuildsDto) -> Result<GuildPage, AppError>;

    /// Guild detail view; flags are computed for an authenticated viewer
    async fn guild_details(&self, name: &str, viewer_account_id: Option<i64>) -> Result<GuildDetails, AppError>;
}

/// Create guild request
#[derive(Debug, Clone)]
pub struct CreateGuildDto {
    pub name: String,
    pub character_name: String,
    pub motd: Option<String>,
}

/// Guild list query
#[derive(Debug, Clone, Default)]
pub struct ListGuildsDto {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// One page of guild summaries
#[derive(Debug, Clone)]
pub struct GuildPage {
    pub guilds: Vec<GuildSummary>,
    pub page: PageRequest,
    pub total: i64,
}

/// What an authenticated viewer may see and do in a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerFlags {
    pub is_member: bool,
    pub can_invite: bool,
    pub has_pending_invite: bool,
}

/// Everything the guild detail view shows
#[derive(Debug, Clone)]
pub struct GuildDetails {
    pub guild: Guild,
    pub owner_name: Option<String>,
    pub ranks: Vec<Rank>,
    pub members: Vec<RosterEntry>,
    pub invites: Vec<GuildInviteEntry>,
    pub viewer: Option<ViewerFlags>,
}

/// GuildService implementation
pub struct GuildServiceImpl<U>
where
    U: UnitOfWork,
{
    uow: Arc<U>,
    settings: GuildSettings,
}

impl<U> GuildServiceImpl<U>
where
    U: UnitOfWork,
{
    pub fn new(uow: Arc<U>, settings: GuildSettings) -> Self {
        Self { uow, settings }
    }

    #[instrument(skip(self, request), fields(guild = %request.name, founder = %request.character_name))]
    async fn create(&self, account_id: i64, request: CreateGuildDto) -> Result<Guild, AppError> {
        let name = GuildName::parse(&request.name)?;
        let motd = request
            .motd
            .as_deref()
            .map(|m| sanitize(m, MAX_MOTD_CHARS))
            .filter(|m| !m.is_empty());
        let min_level = self.settings.min_level;

        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.begin().await?;

            let founder = session
                .find_character_by_name(request.character_name.trim())
                .await?
                .filter(|c| c.belongs_to(account_id))
                .ok_or_else(|| AppError::NotFound("Character not found on your account".to_string()))?;

            if founder.level < min_level {
                debug!(founder_id = founder.id, level = founder.level, "Founder below minimum level");
                return Err(AppError::Forbidden(format!(
                    "Character must be at least level {min_level} to create a guild (current level {})",
                    founder.level
                )));
            }

            if session.find_membership(founder.id).await?.is_some() {
                return Err(AppError::Conflict(
                    "Character is already a member of a guild".to_string(),
                ));
            }

            if session.find_guild_by_owner(founder.id).await?.is_some() {
                return Err(AppError::Conflict("Character already owns a guild".to_string()));
            }

            if session.guild_name_exists(name.as_str()).await? {
                return Err(AppError::Conflict(
                    "A guild with that name already exists".to_string(),
                ));
            }

            let guild = session
                .insert_guild(&NewGuild {
                    name: name.into_inner(),
                    owner_id: founder.id,
                    motd,
                    created_at: Utc::now(),
                })
                .await?;

            let ranks = RankCatalog::seed_default_ranks(&mut session, guild.id).await?;
            MembershipStore::add(&mut session, founder.id, guild.id, ranks.leader).await?;

            session.commit().await?;
            info!(guild_id = guild.id, owner_id = founder.id, "Guild created");

            Ok(guild)
        })
        .await
    }

    #[instrument(skip(self, query), level = "debug")]
    async fn list(&self, query: ListGuildsDto) -> Result<GuildPage, AppError> {
        let page = PageRequest::resolve(
            query.page,
            query.limit,
            self.settings.default_page_size,
            self.settings.max_page_size,
        );
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        // No guild name can contain a term longer than the longest name
        if search
            .as_deref()
            .is_some_and(|s| s.chars().count() > MAX_GUILD_NAME_LEN)
        {
            return Ok(GuildPage {
                guilds: Vec::new(),
                page,
                total: 0,
            });
        }

        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.connect().await?;

            let total = session.count_guilds(search.as_deref()).await?;
            let guilds = session
                .list_guilds(&GuildListQuery {
                    search: search.clone(),
                    limit: page.limit,
                    offset: page.offset(),
                })
                .await?;

            Ok(GuildPage { guilds, page, total })
        })
        .await
    }

    #[instrument(skip(self), level = "debug")]
    async fn details(&self, name: &str, viewer_account_id: Option<i64>) -> Result<GuildDetails, AppError> {
        with_deadline(self.settings.query_timeout(), async {
            let mut session = self.uow.connect().await?;

            let guild = session
                .find_guild_by_name(name.trim())
                .await?
                .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))?;

            let owner_name = session
                .find_character(guild.owner_id)
                .await?
                .map(|c| c.name);
            let ranks = RankCatalog::list_ranks(&mut session, guild.id).await?;
            let members = MembershipStore::list_members(&mut session, &guild).await?;
            let invites = session.list_guild_invites(guild.id).await?;

            let viewer = match viewer_account_id {
                Some(account_id) => {
                    let rank = AuthorizationPolicy::effective_rank(&mut session, account_id, &guild).await?;
                    let has_pending_invite = InviteQueue::has_pending(&mut session, guild.id, account_id).await?;
                    Some(ViewerFlags {
                        is_member: rank.is_member(),
                        can_invite: AuthorizationPolicy::can_invite(rank),
                        has_pending_invite,
                    })
                }
                None => None,
            };

            Ok(GuildDetails {
                guild,
                owner_name,
                ranks,
                members,
                invites,
                viewer,
            })
        })
        .await
    }
}

#[async_trait]
impl<U> GuildService for GuildServiceImpl<U>
where
    U: UnitOfWork,
{
    async fn create_guild(&self, account_id: i64, request: CreateGuildDto) -> Result<Guild, AppError> {
        let started = Instant::now();
        let result = self.create(account_id, request).await;
        record_guild_operation("create_guild", started, &result);
        result
    }

    async fn list_guilds(&self, query: ListGuildsDto) -> Result<GuildPage, AppError> {
        let started = Instant::now();
        let result = self.list(query).await;
        record_guild_operation("list_guilds", started, &result);
        result
    }

    async fn guild_details(&self, name: &str, viewer_account_id: Option<i64>) -> Result<GuildDetails, AppError> {
        let started = Instant::now();
        let result = self.details(name, viewer_account_id).await;
        record_guild_operation("guild_details", started, &result);
        result
    }
}
