//! Membership Repository Implementation
//!
//! PostgreSQL implementation of the MembershipRepository trait.
//! Roster rows are joined with `players`, `guild_ranks` and `players_online`.

use async_trait::async_trait;

use crate::domain::{AccountMember, Membership, MembershipRepository, RosterEntry};
use crate::infrastructure::database::PgSession;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    player_id: i64,
    guild_id: i64,
    rank_id: i64,
    nick: String,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Membership {
            character_id: row.player_id,
            guild_id: row.guild_id,
            rank_id: row.rank_id,
            nick: row.nick,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RosterRow {
    player_id: i64,
    name: String,
    level: i32,
    vocation: i32,
    rank_name: String,
    rank_level: i32,
    nick: String,
    online: bool,
}

impl From<RosterRow> for RosterEntry {
    fn from(row: RosterRow) -> Self {
        RosterEntry {
            character_id: row.player_id,
            name: row.name,
            level: row.level,
            vocation: row.vocation,
            rank_name: row.rank_name,
            rank_level: row.rank_level,
            nick: row.nick,
            online: row.online,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountMemberRow {
    player_id: i64,
    name: String,
    rank_level: i32,
}

#[async_trait]
impl MembershipRepository for PgSession {
    async fn find_membership(&mut self, character_id: i64) -> Result<Option<Membership>, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT player_id, guild_id, rank_id, nick
            FROM guild_membership
            WHERE player_id = $1
            "#,
        )
        .bind(character_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(Membership::from))
    }

    async fn insert_membership(&mut self, membership: &Membership) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO guild_membership (player_id, guild_id, rank_id, nick)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(membership.character_id)
        .bind(membership.guild_id)
        .bind(membership.rank_id)
        .bind(&membership.nick)
        .execute(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Character is already a member of a guild"))?;

        Ok(())
    }

    async fn delete_membership(&mut self, character_id: i64, guild_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM guild_membership
            WHERE player_id = $1 AND guild_id = $2
            "#,
        )
        .bind(character_id)
        .bind(guild_id)
        .execute(self.conn())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn membership_rank_level(
        &mut self,
        character_id: i64,
        guild_id: i64,
    ) -> Result<Option<i32>, AppError> {
        let level = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT r.level
            FROM guild_membership m
            JOIN guild_ranks r ON r.id = m.rank_id
            WHERE m.player_id = $1 AND m.guild_id = $2
            "#,
        )
        .bind(character_id)
        .bind(guild_id)
        .fetch_optional(self.conn())
        .await?;

        Ok(level)
    }

    async fn account_members(&mut self, account_id: i64, guild_id: i64) -> Result<Vec<AccountMember>, AppError> {
        let rows = sqlx::query_as::<_, AccountMemberRow>(
            r#"
            SELECT p.id AS player_id, p.name, r.level AS rank_level
            FROM guild_membership m
            JOIN players p ON p.id = m.player_id
            JOIN guild_ranks r ON r.id = m.rank_id
            WHERE p.account_id = $1 AND m.guild_id = $2
            ORDER BY r.level DESC, p.name ASC
            "#,
        )
        .bind(account_id)
        .bind(guild_id)
        .fetch_all(self.conn())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AccountMember {
                character_id: r.player_id,
                character_name: r.name,
                rank_level: r.rank_level,
            })
            .collect())
    }

    async fn list_roster(&mut self, guild_id: i64) -> Result<Vec<RosterEntry>, AppError> {
        let rows = sqlx::query_as::<_, RosterRow>(
            r#"
            SELECT p.id AS player_id, p.name, p.level, p.vocation,
                   r.name AS rank_name, r.level AS rank_level, m.nick,
                   (o.player_id IS NOT NULL) AS online
            FROM guild_membership m
            JOIN players p ON p.id = m.player_id
            JOIN guild_ranks r ON r.id = m.rank_id
            LEFT JOIN players_online o ON o.player_id = p.id
            WHERE m.guild_id = $1
            "#,
        )
        .bind(guild_id)
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(RosterEntry::from).collect())
    }
}
