use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    models::{Item, ItemQuery},
    AppState,
};

// ── GET / ─────────────────────────────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Value>)> {
    let registry = state.registry.read().await;

    info!(count = registry.len(), "Listed items");

    Ok((StatusCode::OK, Json(json!({ "items": registry.items() }))))
}

// ── GET /items/:item_id ───────────────────────────────────────────────────────

pub async fn get_item(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = state.registry.read().await.get(item_id)?.clone();

    info!(id = item_id, "Fetched item");

    Ok((StatusCode::OK, Json(item)))
}

// ── GET /items/ ───────────────────────────────────────────────────────────────

pub async fn query_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ItemQuery>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let start = Instant::now();
    let selection = state.registry.read().await.query(&query);
    let elapsed = start.elapsed();

    info!(
        matched = selection.len(),
        elapsed_us = elapsed.as_micros(),
        "Queried items"
    );

    Ok((
        StatusCode::OK,
        Json(json!({
            "query": query,
            "selection": selection,
        })),
    ))
}

// ── POST / ────────────────────────────────────────────────────────────────────

pub async fn add_item(
    State(state): State<AppState>,
    AppJson(item): AppJson<Item>,
) -> AppResult<(StatusCode, Json<Value>)> {
    // Write lock spans the existence check and the insert.
    let added = state.registry.write().await.add(item)?;

    info!(id = added.id, name = %added.name, "Added item");

    Ok((StatusCode::OK, Json(json!({ "added": added }))))
}

// ── POST /delete/:item_id ─────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    AppPath(item_id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let deleted = state
        .registry
        .write()
        .await
        .delete(item_id, state.delete_guard)?;

    info!(id = item_id, name = %deleted.name, "Deleted item");

    Ok((StatusCode::OK, Json(json!({ "deleted": deleted }))))
}
