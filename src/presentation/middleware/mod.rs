//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;

pub use auth::{authenticate, decode_account, AuthAccount, Claims};
pub use logging::{create_trace_layer, track_requests};
