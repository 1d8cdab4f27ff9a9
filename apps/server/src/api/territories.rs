use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::Path, routing::get, Json, Router};
use franchise_crm_core::markets::{sample_counties, state_name, US_STATES};
use serde::Serialize;

#[derive(Serialize)]
struct StateOption {
    code: &'static str,
    name: &'static str,
}

async fn list_states() -> Json<Vec<StateOption>> {
    Json(
        US_STATES
            .iter()
            .map(|&(code, name)| StateOption { code, name })
            .collect(),
    )
}

async fn list_counties(Path(code): Path<String>) -> ApiResult<Json<Vec<&'static str>>> {
    if state_name(&code).is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(sample_counties(&code).to_vec()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/territories/states", get(list_states))
        .route("/territories/states/{code}/counties", get(list_counties))
}
