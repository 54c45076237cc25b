//! Authentication Middleware
//!
//! Bearer JWT validation. Tokens are issued by the account service; the
//! `sub` claim carries the account id.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Authenticated account extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAccount {
    pub account_id: i64,
}

/// Validate a bearer token and return the account it was issued for.
pub fn decode_account(secret: &str, token: &str) -> Result<AuthAccount, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    let account_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    Ok(AuthAccount { account_id })
}

/// Attach the authenticated account to the request when a valid token is present.
///
/// Never rejects: protected handlers extract [`AuthAccount`] and answer 401
/// themselves, public handlers ignore a missing or bad token.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        match decode_account(&state.settings.jwt.secret, token) {
            Ok(account) => {
                request.extensions_mut().insert(account);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring bearer token"),
        }
    }

    next.run(request).await
}
