//! Common Test Utilities
//!
//! An in-memory store behind the unit-of-work seam, seeded characters,
//! a router builder and request helpers.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::Mutex;
use tower::ServiceExt;

use guild_server::config::{
    CorsSettings, DatabaseSettings, GuildSettings, JwtSettings, ServerSettings, Settings,
};
use guild_server::domain::{
    AccountInvite, AccountMember, Character, CharacterDirectory, Guild, GuildInviteEntry,
    GuildListQuery, GuildRepository, GuildSummary, Invite, InviteRepository, Membership,
    MembershipRepository, NewGuild, Rank, RankLevel, RankRepository, RosterEntry,
};
use guild_server::infrastructure::database::{StoreSession, UnitOfWork};
use guild_server::presentation::middleware::Claims;
use guild_server::shared::error::AppError;
use guild_server::startup::{build_router, AppState};

pub const JWT_SECRET: &str = "test-secret-test-secret-test-secret";

/// Everything the guild subsystem persists, plus the characters it reads.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub characters: Vec<Character>,
    pub online: HashSet<i64>,
    pub guilds: Vec<Guild>,
    pub ranks: Vec<Rank>,
    pub memberships: Vec<Membership>,
    pub invites: Vec<Invite>,
    next_guild_id: i64,
    next_rank_id: i64,
}

impl StoreState {
    pub fn character(&self, name: &str) -> &Character {
        self.characters
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no character named {name}"))
    }

    pub fn guild(&self, name: &str) -> Option<&Guild> {
        self.guilds
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn membership_of(&self, name: &str) -> Option<&Membership> {
        let id = self.character(name).id;
        self.memberships.iter().find(|m| m.character_id == id)
    }

    pub fn rank(&self, rank_id: i64) -> Option<&Rank> {
        self.ranks.iter().find(|r| r.id == rank_id)
    }

    pub fn members_of(&self, guild_id: i64) -> usize {
        self.memberships
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .count()
    }

    fn character_by_id(&self, id: i64) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    fn rank_level(&self, membership: &Membership) -> i32 {
        self.rank(membership.rank_id).map(|r| r.level).unwrap_or(0)
    }
}

/// Seeded characters
///
/// | id | name   | account | level |
/// |----|--------|---------|-------|
/// | 1  | Thorin | 1       | 50    |
/// | 2  | Balin  | 2       | 30    |
/// | 3  | Dwalin | 2       | 25    |
/// | 4  | Kili   | 3       | 5     |
/// | 5  | Fili   | 3       | 40    |
/// | 6  | Gloin  | 4       | 60    |
/// | 7  | Oin    | 4       | 45    |
pub fn seeded_state() -> StoreState {
    let characters = [
        (1, "Thorin", 1, 50, 8),
        (2, "Balin", 2, 30, 4),
        (3, "Dwalin", 2, 25, 3),
        (4, "Kili", 3, 5, 1),
        (5, "Fili", 3, 40, 2),
        (6, "Gloin", 4, 60, 5),
        (7, "Oin", 4, 45, 6),
    ]
    .into_iter()
    .map(|(id, name, account_id, level, vocation)| Character {
        id,
        name: name.to_string(),
        account_id,
        level,
        vocation,
    })
    .collect();

    StoreState {
        characters,
        online: HashSet::from([1]),
        ..StoreState::default()
    }
}

/// Failure switches shared by every session of a store
#[derive(Debug, Default)]
struct Faults {
    fail_membership_insert: AtomicBool,
    begin_delay: Mutex<Option<Duration>>,
}

/// In-memory unit of work.
///
/// `begin` snapshots the state and `commit` writes the snapshot back, so
/// dropping a session discards its writes like a rolled-back transaction.
#[derive(Clone)]
pub struct MemoryUnitOfWork {
    state: Arc<Mutex<StoreState>>,
    faults: Arc<Faults>,
}

impl MemoryUnitOfWork {
    pub fn new(state: StoreState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            faults: Arc::new(Faults::default()),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seeded_state())
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.lock().clone()
    }

    /// Mutate the committed state directly
    pub fn with_state<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        f(&mut *self.state.lock())
    }

    pub fn fail_membership_inserts(&self, fail: bool) {
        self.faults.fail_membership_insert.store(fail, Ordering::SeqCst);
    }

    pub fn delay_sessions(&self, delay: Duration) {
        *self.faults.begin_delay.lock() = Some(delay);
    }

    async fn open(&self, transactional: bool) -> MemorySession {
        let delay = *self.faults.begin_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        MemorySession {
            working: self.state.lock().clone(),
            shared: self.state.clone(),
            faults: self.faults.clone(),
            transactional,
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession, AppError> {
        Ok(self.open(true).await)
    }

    async fn connect(&self) -> Result<MemorySession, AppError> {
        Ok(self.open(false).await)
    }
}

pub struct MemorySession {
    working: StoreState,
    shared: Arc<Mutex<StoreState>>,
    faults: Arc<Faults>,
    transactional: bool,
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn commit(self) -> Result<(), AppError> {
        if self.transactional {
            *self.shared.lock() = self.working;
        }
        Ok(())
    }
}

#[async_trait]
impl GuildRepository for MemorySession {
    async fn find_guild_by_name(&mut self, name: &str) -> Result<Option<Guild>, AppError> {
        Ok(self.working.guild(name).cloned())
    }

    async fn find_guild_by_owner(&mut self, character_id: i64) -> Result<Option<Guild>, AppError> {
        Ok(self
            .working
            .guilds
            .iter()
            .find(|g| g.owner_id == character_id)
            .cloned())
    }

    async fn guild_name_exists(&mut self, name: &str) -> Result<bool, AppError> {
        Ok(self.working.guild(name).is_some())
    }

    async fn insert_guild(&mut self, guild: &NewGuild) -> Result<Guild, AppError> {
        let taken = self.working.guilds.iter().any(|g| {
            g.name.eq_ignore_ascii_case(&guild.name) || g.owner_id == guild.owner_id
        });
        if taken {
            return Err(AppError::Conflict("Guild name or owner already taken".to_string()));
        }

        self.working.next_guild_id += 1;
        let created = Guild {
            id: self.working.next_guild_id,
            name: guild.name.clone(),
            owner_id: guild.owner_id,
            created_at: guild.created_at,
            motd: guild.motd.clone(),
            balance: 0,
            points: 0,
            level: 1,
        };
        self.working.guilds.push(created.clone());
        Ok(created)
    }

    async fn list_guilds(&mut self, query: &GuildListQuery) -> Result<Vec<GuildSummary>, AppError> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let state = &self.working;

        let mut guilds: Vec<&Guild> = state
            .guilds
            .iter()
            .filter(|g| match &needle {
                Some(n) => g.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .collect();
        guilds.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| b.points.cmp(&a.points))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(guilds
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .map(|g| {
                let members = state.members_of(g.id) as i64;
                let owner_listed = state
                    .memberships
                    .iter()
                    .any(|m| m.guild_id == g.id && m.character_id == g.owner_id);
                GuildSummary {
                    id: g.id,
                    name: g.name.clone(),
                    level: g.level,
                    points: g.points,
                    owner_name: state.character_by_id(g.owner_id).map(|c| c.name.clone()),
                    member_count: (members + i64::from(!owner_listed)).max(1),
                }
            })
            .collect())
    }

    async fn count_guilds(&mut self, search: Option<&str>) -> Result<i64, AppError> {
        let needle = search.map(str::to_lowercase);
        Ok(self
            .working
            .guilds
            .iter()
            .filter(|g| match &needle {
                Some(n) => g.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .count() as i64)
    }
}

#[async_trait]
impl RankRepository for MemorySession {
    async fn insert_rank(&mut self, guild_id: i64, name: &str, level: i32) -> Result<Rank, AppError> {
        if self
            .working
            .ranks
            .iter()
            .any(|r| r.guild_id == guild_id && r.level == level)
        {
            return Err(AppError::Conflict("Rank level already exists".to_string()));
        }

        self.working.next_rank_id += 1;
        let rank = Rank {
            id: self.working.next_rank_id,
            guild_id,
            name: name.to_string(),
            level,
        };
        self.working.ranks.push(rank.clone());
        Ok(rank)
    }

    async fn list_ranks(&mut self, guild_id: i64) -> Result<Vec<Rank>, AppError> {
        let mut ranks: Vec<Rank> = self
            .working
            .ranks
            .iter()
            .filter(|r| r.guild_id == guild_id)
            .cloned()
            .collect();
        ranks.sort_by(|a, b| b.level.cmp(&a.level));
        Ok(ranks)
    }

    async fn lowest_rank(&mut self, guild_id: i64) -> Result<Option<Rank>, AppError> {
        Ok(self
            .working
            .ranks
            .iter()
            .filter(|r| r.guild_id == guild_id)
            .min_by_key(|r| r.level)
            .cloned())
    }
}

#[async_trait]
impl MembershipRepository for MemorySession {
    async fn find_membership(&mut self, character_id: i64) -> Result<Option<Membership>, AppError> {
        Ok(self
            .working
            .memberships
            .iter()
            .find(|m| m.character_id == character_id)
            .cloned())
    }

    async fn insert_membership(&mut self, membership: &Membership) -> Result<(), AppError> {
        if self.faults.fail_membership_insert.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected membership failure".to_string()));
        }
        if self
            .working
            .memberships
            .iter()
            .any(|m| m.character_id == membership.character_id)
        {
            return Err(AppError::Conflict(
                "Character is already a member of a guild".to_string(),
            ));
        }

        self.working.memberships.push(membership.clone());
        Ok(())
    }

    async fn delete_membership(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        let before = self.working.memberships.len();
        self.working
            .memberships
            .retain(|m| !(m.character_id == character_id && m.guild_id == guild_id));
        Ok(self.working.memberships.len() < before)
    }

    async fn membership_rank_level(
        &mut self,
        character_id: i64,
        guild_id: i64,
    ) -> Result<Option<i32>, AppError> {
        let state = &self.working;
        Ok(state
            .memberships
            .iter()
            .find(|m| m.character_id == character_id && m.guild_id == guild_id)
            .map(|m| state.rank_level(m)))
    }

    async fn account_members(&mut self, account_id: i64, guild_id: i64) -> Result<Vec<AccountMember>, AppError> {
        let state = &self.working;
        let mut members: Vec<AccountMember> = state
            .memberships
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .filter_map(|m| {
                let character = state.character_by_id(m.character_id)?;
                character.belongs_to(account_id).then(|| AccountMember {
                    character_id: character.id,
                    character_name: character.name.clone(),
                    rank_level: state.rank_level(m),
                })
            })
            .collect();
        members.sort_by(|a, b| {
            b.rank_level
                .cmp(&a.rank_level)
                .then_with(|| a.character_name.cmp(&b.character_name))
        });
        Ok(members)
    }

    async fn list_roster(&mut self, guild_id: i64) -> Result<Vec<RosterEntry>, AppError> {
        let state = &self.working;
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.guild_id == guild_id)
            .filter_map(|m| {
                let character = state.character_by_id(m.character_id)?;
                let rank = state.rank(m.rank_id)?;
                Some(RosterEntry {
                    character_id: character.id,
                    name: character.name.clone(),
                    level: character.level,
                    vocation: character.vocation,
                    rank_name: rank.name.clone(),
                    rank_level: rank.level,
                    nick: m.nick.clone(),
                    online: state.online.contains(&character.id),
                })
            })
            .collect())
    }
}

#[async_trait]
impl InviteRepository for MemorySession {
    async fn invite_exists(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        Ok(self
            .working
            .invites
            .iter()
            .any(|i| i.character_id == character_id && i.guild_id == guild_id))
    }

    async fn insert_invite(&mut self, invite: &Invite) -> Result<(), AppError> {
        if self.invite_exists(invite.character_id, invite.guild_id).await? {
            return Err(AppError::Conflict(
                "Character already has a pending invite to this guild".to_string(),
            ));
        }
        self.working.invites.push(invite.clone());
        Ok(())
    }

    async fn delete_invite(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        let before = self.working.invites.len();
        self.working
            .invites
            .retain(|i| !(i.character_id == character_id && i.guild_id == guild_id));
        Ok(self.working.invites.len() < before)
    }

    async fn list_guild_invites(&mut self, guild_id: i64) -> Result<Vec<GuildInviteEntry>, AppError> {
        let state = &self.working;
        let mut entries: Vec<GuildInviteEntry> = state
            .invites
            .iter()
            .filter(|i| i.guild_id == guild_id)
            .filter_map(|i| {
                let character = state.character_by_id(i.character_id)?;
                Some(GuildInviteEntry {
                    character_id: character.id,
                    character_name: character.name.clone(),
                    level: character.level,
                    vocation: character.vocation,
                    invited_at: i.invited_at,
                })
            })
            .collect();
        entries.sort_by(|a, b| b.invited_at.cmp(&a.invited_at));
        Ok(entries)
    }

    async fn list_account_invites(&mut self, account_id: i64) -> Result<Vec<AccountInvite>, AppError> {
        let state = &self.working;
        let mut invites: Vec<AccountInvite> = state
            .invites
            .iter()
            .filter_map(|i| {
                let character = state.character_by_id(i.character_id)?;
                let guild = state.guilds.iter().find(|g| g.id == i.guild_id)?;
                character.belongs_to(account_id).then(|| AccountInvite {
                    guild_id: guild.id,
                    guild_name: guild.name.clone(),
                    guild_level: guild.level,
                    guild_points: guild.points,
                    character_id: character.id,
                    character_name: character.name.clone(),
                    invited_at: i.invited_at,
                })
            })
            .collect();
        invites.sort_by(|a, b| b.invited_at.cmp(&a.invited_at));
        Ok(invites)
    }
}

#[async_trait]
impl CharacterDirectory for MemorySession {
    async fn find_character(&mut self, character_id: i64) -> Result<Option<Character>, AppError> {
        Ok(self.working.character_by_id(character_id).cloned())
    }

    async fn find_character_by_name(&mut self, name: &str) -> Result<Option<Character>, AppError> {
        Ok(self
            .working
            .characters
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(name))
            .min_by_key(|c| c.id)
            .cloned())
    }

    async fn is_online(&mut self, character_id: i64) -> Result<bool, AppError> {
        Ok(self.working.online.contains(&character_id))
    }
}

/// Check the rules every committed state must satisfy.
///
/// Guilds whose owner was removed by hand are skipped for the owner check.
pub fn assert_invariants(state: &StoreState) {
    let mut names = HashSet::new();
    for guild in &state.guilds {
        assert!(
            names.insert(guild.name.to_lowercase()),
            "duplicate guild name {}",
            guild.name
        );

        let mut levels: Vec<i32> = state
            .ranks
            .iter()
            .filter(|r| r.guild_id == guild.id)
            .map(|r| r.level)
            .collect();
        levels.sort();
        assert_eq!(levels, vec![1, 2, 3], "guild {} must have exactly three ranks", guild.name);

        if let Some(owner) = state
            .memberships
            .iter()
            .find(|m| m.character_id == guild.owner_id)
        {
            assert_eq!(owner.guild_id, guild.id, "owner of {} belongs elsewhere", guild.name);
            assert_eq!(
                state.rank_level(owner),
                RankLevel::Leader.as_i32(),
                "owner of {} must hold the Leader rank",
                guild.name
            );
        }
    }

    let mut owners = HashSet::new();
    for guild in &state.guilds {
        assert!(owners.insert(guild.owner_id), "character owns two guilds");
    }

    let mut members = HashSet::new();
    for membership in &state.memberships {
        assert!(
            members.insert(membership.character_id),
            "character {} is in two guilds",
            membership.character_id
        );
        let rank = state
            .rank(membership.rank_id)
            .expect("membership references a missing rank");
        assert_eq!(rank.guild_id, membership.guild_id, "rank belongs to another guild");
        if let Some(owned) = state.guilds.iter().find(|g| g.owner_id == membership.character_id) {
            assert_eq!(owned.id, membership.guild_id, "owner is a member of another guild");
        }
    }

    for invite in &state.invites {
        assert!(
            !state.memberships.iter().any(|m| m.character_id == invite.character_id),
            "character {} is invited while already in a guild",
            invite.character_id
        );
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.to_string(),
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        guild: GuildSettings::default(),
        environment: "test".to_string(),
    }
}

/// Bearer token for an account
pub fn token(account_id: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account_id.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Test application over an in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: MemoryUnitOfWork,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryUnitOfWork::seeded();
        let router = build_router(AppState::new(store.clone(), test_settings()));
        Self { router, store }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str, token: Option<&str>) -> axum::response::Response {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str, token: Option<&str>) -> axum::response::Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// POST with no body and no content type
    pub async fn post_empty(&self, uri: &str, token: Option<&str>) -> axum::response::Response {
        let mut request = Request::builder().method("POST").uri(uri);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Read a response body as JSON
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
