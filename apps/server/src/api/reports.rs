use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use franchise_crm_core::reporting::{DashboardStats, WeeklyUpdates};
use serde::Deserialize;

#[derive(Deserialize)]
struct WeeklyUpdatesQuery {
    now: Option<String>,
}

/// Parses the optional `now` override; the server clock is used otherwise.
fn resolve_now(raw: Option<&str>) -> ApiResult<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::BadRequest(format!("Invalid 'now' timestamp '{}': {}", value, e))),
    }
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardStats>> {
    let stats = state.reporting_service.get_dashboard_stats().await?;
    Ok(Json(stats))
}

async fn get_weekly_updates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeeklyUpdatesQuery>,
) -> ApiResult<Json<WeeklyUpdates>> {
    let now = resolve_now(query.now.as_deref())?;
    let updates = state.reporting_service.get_weekly_updates(now).await?;
    Ok(Json(updates))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/weekly-updates", get(get_weekly_updates))
}
