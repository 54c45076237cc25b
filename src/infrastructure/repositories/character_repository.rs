//! Character Directory Implementation
//!
//! Read-only queries against the account service's `players` and
//! `players_online` tables.

use async_trait::async_trait;

use crate::domain::{Character, CharacterDirectory};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CharacterRow {
    id: i64,
    name: String,
    account_id: i64,
    level: i32,
    vocation: i32,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Character {
            id: row.id,
            name: row.name,
            account_id: row.account_id,
            level: row.level,
            vocation: row.vocation,
        }
    }
}

#[async_trait]
impl CharacterDirectory for PgSession {
    async fn find_character(&mut self, character_id: i64) -> Result<Option<Character>, AppError> {
        let row = sqlx::query_as::<_, CharacterRow>(
            r#"
            SELECT id, name, account_id, level, vocation
            FROM players
            WHERE id = $1
            "#,
        )
        .bind(character_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Character::from))
    }

    async fn find_character_by_name(&mut self, name: &str) -> Result<Option<Character>, AppError> {
        let row = sqlx::query_as::<_, CharacterRow>(
            r#"
            SELECT id, name, account_id, level, vocation
            FROM players
            WHERE LOWER(name) = LOWER($1)
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Character::from))
    }

    async fn is_online(&mut self, character_id: i64) -> Result<bool, AppError> {
        let online = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM players_online WHERE player_id = $1)
            "#,
        )
        .bind(character_id)
        .fetch_one(self.conn())
        .await?;

        Ok(online)
    }
}
