//! Validated guild name.

use std::fmt;

use crate::shared::error::AppError;

/// Shortest accepted guild name, in characters.
pub const MIN_GUILD_NAME_LEN: usize = 3;

/// Longest accepted guild name, in characters.
pub const MAX_GUILD_NAME_LEN: usize = 20;

/// A guild name that passed format validation.
///
/// Uniqueness is case-insensitive and enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildName(String);

impl GuildName {
    /// Trim and validate a requested guild name.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(AppError::Validation("Guild name is required".into()));
        }

        let len = name.chars().count();
        if !(MIN_GUILD_NAME_LEN..=MAX_GUILD_NAME_LEN).contains(&len) {
            return Err(AppError::Validation(format!(
                "Guild name must be between {} and {} characters",
                MIN_GUILD_NAME_LEN, MAX_GUILD_NAME_LEN
            )));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
            return Err(AppError::Validation(
                "Guild name must contain only letters, numbers, and spaces".into(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GuildName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
