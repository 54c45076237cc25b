//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guild_server::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Founders need level {}", settings.guild.min_level);
//! ```

mod settings;

pub use settings::*;
