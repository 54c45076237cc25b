//! Custom Extractors
//!
//! Read the account attached by the authentication middleware.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::presentation::middleware::AuthAccount;
use crate::shared::error::AppError;

impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthAccount>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

/// Authenticated account if the request carried a valid token.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAccount(pub Option<AuthAccount>);

impl<S> FromRequestParts<S> for MaybeAccount
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAccount(parts.extensions.get::<AuthAccount>().copied()))
    }
}
