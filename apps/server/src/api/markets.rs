use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use franchise_crm_core::{
    markets::{Market, MarketUpdate, NewMarket},
    properties::Property,
    reporting::{MarketOverview, MarketWithDetails},
};

async fn list_markets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Market>>> {
    let markets = state.market_service.get_markets().await?;
    Ok(Json(markets))
}

async fn list_markets_with_details(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MarketWithDetails>>> {
    let details = state.reporting_service.get_markets_with_details().await?;
    Ok(Json(details))
}

async fn get_market(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Market>> {
    let market = state.market_service.get_market(&id).await?;
    Ok(Json(market))
}

async fn create_market(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMarket>,
) -> ApiResult<(StatusCode, Json<Market>)> {
    let created = state.market_service.create_market(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_market(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<MarketUpdate>,
) -> ApiResult<Json<Market>> {
    payload.id = Some(id);
    let updated = state.market_service.update_market(payload).await?;
    Ok(Json(updated))
}

async fn delete_market(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.market_service.delete_market(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_market_overview(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MarketOverview>> {
    state
        .reporting_service
        .get_market_overview(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn list_market_properties(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Property>>> {
    let properties = state.property_service.get_properties_by_market(&id).await?;
    Ok(Json(properties))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/markets", get(list_markets).post(create_market))
        .route("/markets/details", get(list_markets_with_details))
        .route(
            "/markets/{id}",
            get(get_market).patch(update_market).delete(delete_market),
        )
        .route("/markets/{id}/overview", get(get_market_overview))
        .route("/markets/{id}/properties", get(list_market_properties))
}
