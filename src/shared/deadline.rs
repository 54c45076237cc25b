//! Operation Deadlines
//!
//! Bounds a unit of store work by a wall-clock deadline.

use std::future::Future;
use std::time::Duration;

use super::error::AppError;

/// Run `operation` and fail with [`AppError::Timeout`] once `limit` elapses.
///
/// The operation future is dropped on expiry, so an open transaction held
/// inside it is rolled back.
pub async fn with_deadline<F, T>(limit: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout),
    }
}
