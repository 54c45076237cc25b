//! Guild Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateGuildRequest, ListGuildsQuery};
use crate::application::dto::response::{CreateGuildResponse, GuildDetailsResponse, GuildListResponse};
use crate::presentation::http::extractors::MaybeAccount;
use crate::presentation::middleware::AuthAccount;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Create a new guild
pub async fn create_guild(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(body): Json<CreateGuildRequest>,
) -> Result<(StatusCode, Json<CreateGuildResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let guild = state
        .guilds
        .create_guild(auth.account_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(CreateGuildResponse::from(guild))))
}

/// List guilds
pub async fn list_guilds(
    State(state): State<AppState>,
    Query(query): Query<ListGuildsQuery>,
) -> Result<Json<GuildListResponse>, AppError> {
    let page = state.guilds.list_guilds(query.into()).await?;
    Ok(Json(GuildListResponse::from(page)))
}

/// Get guild details by name
pub async fn get_guild(
    State(state): State<AppState>,
    MaybeAccount(viewer): MaybeAccount,
    Path(name): Path<String>,
) -> Result<Json<GuildDetailsResponse>, AppError> {
    let details = state
        .guilds
        .guild_details(&name, viewer.map(|v| v.account_id))
        .await?;

    Ok(Json(GuildDetailsResponse::from(details)))
}
