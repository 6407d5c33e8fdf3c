use std::sync::Arc;

use ideaboard_core::service::MarketplaceService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Idea and application operations.
    pub service: Arc<MarketplaceService>,
    /// Server configuration (identity verification, timeouts).
    pub config: Arc<ServerConfig>,
}
