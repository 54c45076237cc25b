//! Membership Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CharacterSelectionRequest, PlayerNameRequest};
use crate::application::dto::response::MessageResponse;
use crate::presentation::middleware::AuthAccount;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Leave a guild
pub async fn leave_guild(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(guild_name): Path<String>,
    body: Option<Json<CharacterSelectionRequest>>,
) -> Result<Json<MessageResponse>, AppError> {
    // No JSON body behaves like an empty selection.
    let body = body.map(|Json(body)| body).unwrap_or_default();
    body.validate().map_err(validation_error)?;

    state
        .membership
        .leave_guild(auth.account_id, &guild_name, body.character_name.as_deref())
        .await?;

    Ok(Json(MessageResponse::new("You have left the guild")))
}

/// Kick a member from a guild
pub async fn kick_player(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(guild_name): Path<String>,
    Json(body): Json<PlayerNameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    state
        .membership
        .kick_player(auth.account_id, &guild_name, &body.player_name)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "{} has been removed from the guild",
        body.player_name
    ))))
}
