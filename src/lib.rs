//! # Guild Server Library
//!
//! Guild subsystem of a game account site:
//! - Guild creation with seeded ranks and founder membership
//! - Invites, acceptance, leaving and kicking
//! - Public guild list and detail view
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Guild entities, rank ordering, repository traits and guild rules
//! - **Application Layer**: Guild services and DTOs
//! - **Infrastructure Layer**: Postgres unit of work, repositories and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! guild_server/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, domain services, repository traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database and metrics implementations
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, validation, deadlines)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
