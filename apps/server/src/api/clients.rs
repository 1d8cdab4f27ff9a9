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
    clients::{Client, ClientUpdate, NewClient},
    markets::Market,
    reporting::{ClientOverview, ClientWithDetails},
};

async fn list_clients(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Client>>> {
    let clients = state.client_service.get_clients().await?;
    Ok(Json(clients))
}

async fn list_clients_with_details(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ClientWithDetails>>> {
    let details = state.reporting_service.get_clients_with_details().await?;
    Ok(Json(details))
}

async fn get_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Client>> {
    let client = state.client_service.get_client(&id).await?;
    Ok(Json(client))
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewClient>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let created = state.client_service.create_client(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<ClientUpdate>,
) -> ApiResult<Json<Client>> {
    payload.id = Some(id);
    let updated = state.client_service.update_client(payload).await?;
    Ok(Json(updated))
}

async fn delete_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.client_service.delete_client(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_client_overview(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClientOverview>> {
    state
        .reporting_service
        .get_client_overview(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn list_client_markets(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Market>>> {
    let markets = state.market_service.get_markets_by_client(&id).await?;
    Ok(Json(markets))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/details", get(list_clients_with_details))
        .route(
            "/clients/{id}",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route("/clients/{id}/overview", get(get_client_overview))
        .route("/clients/{id}/markets", get(list_client_markets))
}
