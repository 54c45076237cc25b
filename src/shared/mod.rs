//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod deadline;
pub mod error;
pub mod validation;
