//! Guild Repository Implementation
//!
//! PostgreSQL implementation of the GuildRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Guild, GuildListQuery, GuildRepository, GuildSummary, NewGuild};
use crate::infrastructure::database::{like_pattern, PgSession};
use crate::shared::error::AppError;

/// Database row representation matching the guilds table schema.
#[derive(Debug, sqlx::FromRow)]
struct GuildRow {
    id: i64,
    name: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    motd: Option<String>,
    balance: i64,
    points: i32,
    level: i32,
}

impl From<GuildRow> for Guild {
    fn from(row: GuildRow) -> Self {
        Guild {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            created_at: row.created_at,
            motd: row.motd,
            balance: row.balance,
            points: row.points,
            level: row.level,
        }
    }
}

/// One row of the guild list query.
#[derive(Debug, sqlx::FromRow)]
struct GuildSummaryRow {
    id: i64,
    name: String,
    level: i32,
    points: i32,
    owner_name: Option<String>,
    member_count: i64,
}

impl From<GuildSummaryRow> for GuildSummary {
    fn from(row: GuildSummaryRow) -> Self {
        GuildSummary {
            id: row.id,
            name: row.name,
            level: row.level,
            points: row.points,
            owner_name: row.owner_name,
            member_count: row.member_count,
        }
    }
}

const GUILD_COLUMNS: &str = "id, name, owner_id, created_at, motd, balance, points, level";

#[async_trait]
impl GuildRepository for PgSession {
    async fn find_guild_by_name(&mut self, name: &str) -> Result<Option<Guild>, AppError> {
        let row = sqlx::query_as::<_, GuildRow>(&format!(
            "SELECT {GUILD_COLUMNS} FROM guilds WHERE LOWER(name) = LOWER($1)"
        ))
        .bind(name)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Guild::from))
    }

    async fn find_guild_by_owner(&mut self, character_id: i64) -> Result<Option<Guild>, AppError> {
        let row = sqlx::query_as::<_, GuildRow>(&format!(
            "SELECT {GUILD_COLUMNS} FROM guilds WHERE owner_id = $1"
        ))
        .bind(character_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Guild::from))
    }

    async fn guild_name_exists(&mut self, name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM guilds WHERE LOWER(name) = LOWER($1))
            "#,
        )
        .bind(name)
        .fetch_one(self.conn())
        .await?;

        Ok(exists)
    }

    async fn insert_guild(&mut self, guild: &NewGuild) -> Result<Guild, AppError> {
        let row = sqlx::query_as::<_, GuildRow>(&format!(
            r#"
            INSERT INTO guilds (name, owner_id, created_at, motd, balance, points, level)
            VALUES ($1, $2, $3, $4, 0, 0, 1)
            RETURNING {GUILD_COLUMNS}
            "#
        ))
        .bind(&guild.name)
        .bind(guild.owner_id)
        .bind(guild.created_at)
        .bind(&guild.motd)
        .fetch_one(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Guild name or owner already taken"))?;

        Ok(row.into())
    }

    async fn list_guilds(&mut self, query: &GuildListQuery) -> Result<Vec<GuildSummary>, AppError> {
        let pattern = query.search.as_deref().map(like_pattern);

        let rows = sqlx::query_as::<_, GuildSummaryRow>(
            r#"
            SELECT g.id, g.name, g.level, g.points,
                   owner.name AS owner_name,
                   GREATEST(
                       (SELECT COUNT(DISTINCT m.player_id) FROM guild_membership m WHERE m.guild_id = g.id)
                       + CASE WHEN EXISTS(
                             SELECT 1 FROM guild_membership om
                             WHERE om.guild_id = g.id AND om.player_id = g.owner_id
                         ) THEN 0 ELSE 1 END,
                       1
                   )::BIGINT AS member_count
            FROM guilds g
            LEFT JOIN players owner ON owner.id = g.owner_id
            WHERE ($1::TEXT IS NULL OR g.name ILIKE $1)
            ORDER BY g.level DESC, g.points DESC, g.name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pattern)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(GuildSummary::from).collect())
    }

    async fn count_guilds(&mut self, search: Option<&str>) -> Result<i64, AppError> {
        let pattern = search.map(like_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM guilds
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            "#,
        )
        .bind(pattern)
        .fetch_one(self.conn())
        .await?;

        Ok(total)
    }
}
