use folioview::{
    api, config::Config, AuthContext, HttpPortfolioSource, PortfolioSource, SessionAuth,
};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    let auth = Arc::new(match &config.portfolio_api_token {
        Some(token) => AuthContext::with_token(token.clone()),
        None => AuthContext::new(),
    });
    auth.on_unauthorized(Box::new(|| {
        tracing::warn!("Session rejected by portfolio backend; set a fresh PORTFOLIO_API_TOKEN");
    }));

    let source: Arc<dyn PortfolioSource> = Arc::new(HttpPortfolioSource::new(
        config.portfolio_api_url.clone(),
        auth.clone(),
    ));

    let app = api::create_router(api::AppState::new(source, auth, config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
