pub mod dashboard;
pub mod health;

use crate::auth::SessionAuth;
use crate::config::Config;
use crate::datasource::PortfolioSource;
use crate::engine::WindowDeltaCalculator;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PortfolioSource>,
    pub auth: Arc<dyn SessionAuth>,
    pub config: Config,
    pub calculator: WindowDeltaCalculator,
}

impl AppState {
    pub fn new(
        source: Arc<dyn PortfolioSource>,
        auth: Arc<dyn SessionAuth>,
        config: Config,
    ) -> Self {
        let calculator = WindowDeltaCalculator::new(config.delta_tolerance_percent);
        Self {
            source,
            auth,
            config,
            calculator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/dashboard", get(dashboard::get_dashboard))
        .route("/v1/assets", get(dashboard::get_assets))
        .route("/v1/allocation", get(dashboard::get_allocation))
        .route("/v1/summary", get(dashboard::get_summary))
        .route("/v1/chart", get(dashboard::get_chart))
        .layer(cors)
        .with_state(state)
}
