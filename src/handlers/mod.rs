pub mod items;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{error::AppResult, AppState};

pub async fn health(State(state): State<AppState>) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let items = state.registry.read().await.len();
    Ok((
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "item-registry", "items": items })),
    ))
}
