use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::auth::SessionAuth;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once configured; reports whether upstream calls will carry a session.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "authenticated": state.auth.is_authenticated(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthContext;
    use crate::config::Config;
    use crate::datasource::MockPortfolioSource;
    use crate::domain::Decimal;
    use crate::engine::Timeframe;
    use std::sync::Arc;

    fn state(auth: AuthContext) -> AppState {
        let config = Config {
            port: 0,
            portfolio_api_url: "http://example.invalid".to_string(),
            portfolio_api_token: None,
            default_timeframe: Timeframe::Month,
            delta_tolerance_percent: Decimal::zero(),
        };
        AppState::new(Arc::new(MockPortfolioSource::new()), Arc::new(auth), config)
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_reports_session() {
        let Json(body) = ready(State(state(AuthContext::with_token("t")))).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["authenticated"], true);

        let Json(body) = ready(State(state(AuthContext::new()))).await;
        assert_eq!(body["authenticated"], false);
    }
}
