//! Rank Repository Implementation
//!
//! PostgreSQL implementation of the RankRepository trait.

use async_trait::async_trait;

use crate::domain::{Rank, RankRepository};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct RankRow {
    id: i64,
    guild_id: i64,
    name: String,
    level: i32,
}

impl From<RankRow> for Rank {
    fn from(row: RankRow) -> Self {
        Rank {
            id: row.id,
            guild_id: row.guild_id,
            name: row.name,
            level: row.level,
        }
    }
}

#[async_trait]
impl RankRepository for PgSession {
    async fn insert_rank(&mut self, guild_id: i64, name: &str, level: i32) -> Result<Rank, AppError> {
        let row = sqlx::query_as::<_, RankRow>(
            r#"
            INSERT INTO guild_ranks (guild_id, name, level)
            VALUES ($1, $2, $3)
            RETURNING id, guild_id, name, level
            "#,
        )
        .bind(guild_id)
        .bind(name)
        .bind(level)
        .fetch_one(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Rank level already exists in this guild"))?;

        Ok(row.into())
    }

    async fn list_ranks(&mut self, guild_id: i64) -> Result<Vec<Rank>, AppError> {
        let rows = sqlx::query_as::<_, RankRow>(
            r#"
            SELECT id, guild_id, name, level
            FROM guild_ranks
            WHERE guild_id = $1
            ORDER BY level DESC
            "#,
        )
        .bind(guild_id)
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(Rank::from).collect())
    }

    async fn lowest_rank(&mut self, guild_id: i64) -> Result<Option<Rank>, AppError> {
        let row = sqlx::query_as::<_, RankRow>(
            r#"
            SELECT id, guild_id, name, level
            FROM guild_ranks
            WHERE guild_id = $1
            ORDER BY level ASC
            LIMIT 1
            "#,
        )
        .bind(guild_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Rank::from))
    }
}
