//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database unit of work and repositories (PostgreSQL)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
