//! Unit of Work Pattern Implementation
//!
//! Provides transactional boundaries for guild operations. A session
//! implements every guild repository trait, so all checks and writes of one
//! operation run against the same connection.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use crate::domain::entities::{
    CharacterDirectory, GuildRepository, InviteRepository, MembershipRepository, RankRepository,
};
use crate::shared::error::AppError;

/// A store session bundling all guild repositories.
///
/// Dropping a transactional session without calling [`commit`](Self::commit)
/// rolls it back.
#[async_trait]
pub trait StoreSession:
    GuildRepository + RankRepository + MembershipRepository + InviteRepository + CharacterDirectory + Send + Sized + 'static
{
    /// Commit the session's transaction; a no-op for plain sessions.
    async fn commit(self) -> Result<(), AppError>;
}

/// Unit of Work trait for opening store sessions.
#[async_trait]
pub trait UnitOfWork: Send + Sync + 'static {
    type Session: StoreSession;

    /// Begin a transactional session for a mutating operation.
    async fn begin(&self) -> Result<Self::Session, AppError>;

    /// Open a plain session for read-only operations.
    async fn connect(&self) -> Result<Self::Session, AppError>;
}

enum PgHandle {
    Pooled(PoolConnection<Postgres>),
    Transaction(Transaction<'static, Postgres>),
}

/// PostgreSQL session, either inside a transaction or on a pooled connection.
pub struct PgSession {
    handle: PgHandle,
}

impl PgSession {
    /// Connection to run queries on.
    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        match &mut self.handle {
            PgHandle::Pooled(conn) => &mut **conn,
            PgHandle::Transaction(tx) => &mut **tx,
        }
    }
}

#[async_trait]
impl StoreSession for PgSession {
    async fn commit(self) -> Result<(), AppError> {
        match self.handle {
            PgHandle::Transaction(tx) => {
                tx.commit().await?;
                debug!("Transaction committed");
                Ok(())
            }
            PgHandle::Pooled(_) => Ok(()),
        }
    }
}

/// PostgreSQL Unit of Work implementation.
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create from a PgPool directly.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    type Session = PgSession;

    async fn begin(&self) -> Result<PgSession, AppError> {
        let tx = self.pool.begin().await?;
        Ok(PgSession {
            handle: PgHandle::Transaction(tx),
        })
    }

    async fn connect(&self) -> Result<PgSession, AppError> {
        let conn = self.pool.acquire().await?;
        Ok(PgSession {
            handle: PgHandle::Pooled(conn),
        })
    }
}
