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
    properties::{
        MapPoint, NewProperty, Property, PropertyUpdate, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM,
    },
    reporting::PropertyOverview,
};
use serde::Serialize;

/// Initial viewport plus every plottable property.
#[derive(Serialize)]
struct MapView {
    center: (f64, f64),
    zoom: f64,
    points: Vec<MapPoint>,
}

async fn list_properties(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Property>>> {
    let properties = state.property_service.get_properties().await?;
    Ok(Json(properties))
}

async fn get_property(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Property>> {
    let property = state.property_service.get_property(&id).await?;
    Ok(Json(property))
}

async fn create_property(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProperty>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let created = state.property_service.create_property(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_property(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<PropertyUpdate>,
) -> ApiResult<Json<Property>> {
    payload.id = Some(id);
    let updated = state.property_service.update_property(payload).await?;
    Ok(Json(updated))
}

async fn delete_property(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.property_service.delete_property(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_property_overview(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PropertyOverview>> {
    state
        .reporting_service
        .get_property_overview(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn get_property_map(State(state): State<Arc<AppState>>) -> ApiResult<Json<MapView>> {
    let points = state.reporting_service.get_map_points().await?;
    Ok(Json(MapView {
        center: DEFAULT_MAP_CENTER,
        zoom: DEFAULT_MAP_ZOOM,
        points,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/map", get(get_property_map))
        .route(
            "/properties/{id}",
            get(get_property)
                .patch(update_property)
                .delete(delete_property),
        )
        .route("/properties/{id}/overview", get(get_property_overview))
}
