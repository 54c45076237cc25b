//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod guild;
pub mod health;
pub mod invite;
pub mod membership;
