//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    GuildService, GuildServiceImpl, InviteService, InviteServiceImpl, MembershipService,
    MembershipServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database::{self, PgUnitOfWork, UnitOfWork};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub guilds: Arc<dyn GuildService>,
    pub invites: Arc<dyn InviteService>,
    pub membership: Arc<dyn MembershipService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the guild services to a unit of work
    pub fn new<U: UnitOfWork>(uow: U, settings: Settings) -> Self {
        let uow = Arc::new(uow);
        let guild_settings = settings.guild.clone();

        Self {
            guilds: Arc::new(GuildServiceImpl::new(uow.clone(), guild_settings.clone())),
            invites: Arc::new(InviteServiceImpl::new(uow.clone(), guild_settings.clone())),
            membership: Arc::new(MembershipServiceImpl::new(uow, guild_settings)),
            settings: Arc::new(settings),
        }
    }
}

/// Build the router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        database::run_migrations(&db).await?;
        tracing::info!("Database migrations applied");

        let addr: SocketAddr = settings.server_addr().parse()?;
        let router = build_router(AppState::new(PgUnitOfWork::from_pool(db), settings));

        // Bind to address
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
