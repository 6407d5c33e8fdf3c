use std::net::SocketAddr;
use std::sync::Arc;

use ideaboard_core::service::MarketplaceService;
use ideaboard_db::{PgApplicationRepository, PgIdeaRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideaboard_api::config::ServerConfig;
use ideaboard_api::router::build_app_router;
use ideaboard_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ideaboard_api=debug,ideaboard_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let service = match &config.database_url {
        Some(database_url) => {
            let pool = ideaboard_db::create_pool(database_url, config.db_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            ideaboard_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            ideaboard_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            MarketplaceService::new(
                Arc::new(PgIdeaRepository::new(pool.clone())),
                Arc::new(PgApplicationRepository::new(pool)),
                config.service_config(),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; serving from in-memory repositories");
            MarketplaceService::in_memory(config.service_config())
        }
    };

    // --- App state ---
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config).expect("Invalid server configuration");

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
