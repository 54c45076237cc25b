//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CreateGuildDto, ListGuildsDto};

/// Create guild request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuildRequest {
    /// Format is checked when the name is parsed
    pub name: String,

    #[validate(length(min = 1, max = 30, message = "Character name must be 1-30 characters"))]
    pub character_name: String,

    pub motd: Option<String>,
}

impl From<CreateGuildRequest> for CreateGuildDto {
    fn from(request: CreateGuildRequest) -> Self {
        Self {
            name: request.name,
            character_name: request.character_name,
            motd: request.motd,
        }
    }
}

/// Body naming the character to invite or kick
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNameRequest {
    #[validate(length(min = 1, max = 30, message = "Player name is required"))]
    pub player_name: String,
}

/// Optional choice of which of the caller's characters acts
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterSelectionRequest {
    #[validate(length(min = 1, max = 30, message = "Character name must be 1-30 characters"))]
    pub character_name: Option<String>,
}

/// Guild list query string
#[derive(Debug, Default, Deserialize)]
pub struct ListGuildsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl From<ListGuildsQuery> for ListGuildsDto {
    fn from(query: ListGuildsQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            search: query.search,
        }
    }
}
