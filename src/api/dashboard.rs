use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::AppState;
use crate::datasource::DataSourceError;
use crate::domain::{Decimal, HistoricalData, PortfolioSnapshot, Symbol};
use crate::engine::{
    allocation_total, build_dashboard, build_summary, chart, normalize, project, AssetView,
    ChartSeries, DashboardView, PortfolioSummary, Timeframe,
};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct TimeframeQuery {
    pub timeframe: Option<String>,
}

fn resolve_timeframe(params: &TimeframeQuery, fallback: Timeframe) -> Result<Timeframe, AppError> {
    match params.timeframe.as_deref().map(str::trim) {
        None | Some("") => Ok(fallback),
        Some(s) => s
            .parse::<Timeframe>()
            .map_err(|e| AppError::BadRequest(format!("Invalid timeframe: {}", e))),
    }
}

/// Fetch balance and history concurrently.
///
/// The balance is required. A failed history fetch degrades to `None` so the
/// asset rows still render, except on 401 which is always surfaced.
async fn fetch_both(
    state: &AppState,
) -> Result<(PortfolioSnapshot, Option<HistoricalData>), AppError> {
    let (snapshot, history) =
        tokio::join!(state.source.fetch_balance(), state.source.fetch_history());
    let snapshot = snapshot?;

    let history = match history {
        Ok(history) => Some(history),
        Err(e @ DataSourceError::Unauthorized) => return Err(e.into()),
        Err(e) => {
            warn!("History unavailable, serving balance only: {}", e);
            None
        }
    };
    Ok((snapshot, history))
}

pub async fn get_dashboard(
    Query(params): Query<TimeframeQuery>,
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    let timeframe = resolve_timeframe(&params, state.config.default_timeframe)?;
    let (snapshot, history) = fetch_both(&state).await?;

    Ok(Json(build_dashboard(
        &snapshot,
        history.as_ref(),
        timeframe,
        &state.calculator,
    )))
}

#[derive(Debug, Serialize)]
pub struct AssetsResponse {
    pub assets: Vec<AssetView>,
}

pub async fn get_assets(State(state): State<AppState>) -> Result<Json<AssetsResponse>, AppError> {
    let snapshot = state.source.fetch_balance().await?;
    Ok(Json(AssetsResponse {
        assets: normalize(&snapshot),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub symbol: Symbol,
    pub value: Decimal,
    pub color: String,
    pub percent: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub total: Decimal,
    pub slices: Vec<AllocationEntry>,
}

pub async fn get_allocation(
    State(state): State<AppState>,
) -> Result<Json<AllocationResponse>, AppError> {
    let snapshot = state.source.fetch_balance().await?;
    let slices = project(&normalize(&snapshot));
    let total = allocation_total(&slices);

    let slices = slices
        .iter()
        .map(|slice| AllocationEntry {
            symbol: slice.symbol.clone(),
            value: slice.value,
            color: slice.color().to_string(),
            percent: slice.share_percent(total),
        })
        .collect();

    Ok(Json(AllocationResponse { total, slices }))
}

pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSummary>, AppError> {
    let (snapshot, history) = fetch_both(&state).await?;
    Ok(Json(build_summary(
        Some(&snapshot),
        history.as_ref(),
        &state.calculator,
    )))
}

pub async fn get_chart(
    Query(params): Query<TimeframeQuery>,
    State(state): State<AppState>,
) -> Result<Json<ChartSeries>, AppError> {
    let timeframe = resolve_timeframe(&params, state.config.default_timeframe)?;
    let history = state.source.fetch_history().await?;
    Ok(Json(chart::format(&history.series, timeframe)))
}
