//! Invite Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::invite::PendingInviteResponse;
use crate::application::dto::request::{CharacterSelectionRequest, PlayerNameRequest};
use crate::application::dto::response::MessageResponse;
use crate::presentation::middleware::AuthAccount;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Invite a character to a guild
pub async fn invite_player(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(guild_name): Path<String>,
    Json(body): Json<PlayerNameRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let invited = state
        .invites
        .invite_player(auth.account_id, &guild_name, &body.player_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "{} has been invited to {}",
            invited.character_name, invited.guild_name
        ))),
    ))
}

/// Accept a pending invite
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(guild_name): Path<String>,
    body: Option<Json<CharacterSelectionRequest>>,
) -> Result<Json<MessageResponse>, AppError> {
    // No JSON body behaves like an empty selection.
    let body = body.map(|Json(body)| body).unwrap_or_default();
    body.validate().map_err(validation_error)?;

    let accepted = state
        .invites
        .accept_invite(auth.account_id, &guild_name, body.character_name.as_deref())
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "{} has joined {}",
        accepted.character_name, accepted.guild_name
    ))))
}

/// List pending invites of the caller's characters
pub async fn pending_invites(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<Vec<PendingInviteResponse>>, AppError> {
    let invites = state.invites.pending_invites(auth.account_id).await?;
    Ok(Json(invites.into_iter().map(PendingInviteResponse::from).collect()))
}
