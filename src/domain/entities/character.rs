//! Character directory.
//!
//! Characters live in the `players` table owned by the account service;
//! presence comes from `players_online`. This crate only reads them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub account_id: i64,
    pub level: i32,
    pub vocation: i32,
}

impl Character {
    /// Check whether the character belongs to an account.
    pub fn belongs_to(&self, account_id: i64) -> bool {
        self.account_id == account_id
    }
}

/// Read access to characters and their presence.
#[async_trait]
pub trait CharacterDirectory: Send {
    /// Find a character by id.
    async fn find_character(&mut self, character_id: i64) -> Result<Option<Character>, AppError>;

    /// Find a character by name, ignoring case.
    async fn find_character_by_name(&mut self, name: &str) -> Result<Option<Character>, AppError>;

    /// Whether the character is currently online.
    async fn is_online(&mut self, character_id: i64) -> Result<bool, AppError>;
}
