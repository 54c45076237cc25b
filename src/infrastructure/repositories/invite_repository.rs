//! Invite Repository Implementation
//!
//! PostgreSQL implementation of the InviteRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AccountInvite, GuildInviteEntry, Invite, InviteRepository};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct GuildInviteRow {
    player_id: i64,
    name: String,
    level: i32,
    vocation: i32,
    invited_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct AccountInviteRow {
    guild_id: i64,
    guild_name: String,
    guild_level: i32,
    guild_points: i32,
    player_id: i64,
    player_name: String,
    invited_at: DateTime<Utc>,
}

impl From<AccountInviteRow> for AccountInvite {
    fn from(row: AccountInviteRow) -> Self {
        AccountInvite {
            guild_id: row.guild_id,
            guild_name: row.guild_name,
            guild_level: row.guild_level,
            guild_points: row.guild_points,
            character_id: row.player_id,
            character_name: row.player_name,
            invited_at: row.invited_at,
        }
    }
}

#[async_trait]
impl InviteRepository for PgSession {
    async fn invite_exists(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM guild_invites WHERE player_id = $1 AND guild_id = $2
            )
            "#,
        )
        .bind(character_id)
        .bind(guild_id)
        .fetch_one(self.conn())
        .await?;

        Ok(exists)
    }

    async fn insert_invite(&mut self, invite: &Invite) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO guild_invites (player_id, guild_id, invited_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(invite.character_id)
        .bind(invite.guild_id)
        .bind(invite.invited_at)
        .execute(self.conn())
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(e, "Character already has a pending invite to this guild")
        })?;

        Ok(())
    }

    async fn delete_invite(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM guild_invites
            WHERE player_id = $1 AND guild_id = $2
            "#,
        )
        .bind(character_id)
        .bind(guild_id)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_guild_invites(&mut self, guild_id: i64) -> Result<Vec<GuildInviteEntry>, AppError> {
        let rows = sqlx::query_as::<_, GuildInviteRow>(
            r#"
            SELECT p.id AS player_id, p.name, p.level, p.vocation, i.invited_at
            FROM guild_invites i
            JOIN players p ON p.id = i.player_id
            WHERE i.guild_id = $1
            ORDER BY i.invited_at DESC
            "#,
        )
        .bind(guild_id)
        .fetch_all(self.conn())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GuildInviteEntry {
                character_id: r.player_id,
                character_name: r.name,
                level: r.level,
                vocation: r.vocation,
                invited_at: r.invited_at,
            })
            .collect())
    }

    async fn list_account_invites(&mut self, account_id: i64) -> Result<Vec<AccountInvite>, AppError> {
        let rows = sqlx::query_as::<_, AccountInviteRow>(
            r#"
            SELECT g.id AS guild_id, g.name AS guild_name, g.level AS guild_level,
                   g.points AS guild_points, p.id AS player_id, p.name AS player_name,
                   i.invited_at
            FROM guild_invites i
            JOIN guilds g ON g.id = i.guild_id
            JOIN players p ON p.id = i.player_id
            WHERE p.account_id = $1
            ORDER BY i.invited_at DESC
            "#,
        )
        .bind(account_id)
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(AccountInvite::from).collect())
    }
}
