//! HTTP Surface
//!
//! Routes, handlers and extractors for the guild API.

pub mod extractors;
pub mod handlers;
pub mod routes;
