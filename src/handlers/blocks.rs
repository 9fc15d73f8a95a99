use super::{require_admin, ApiResult};
use crate::models::BlockedSlot;
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SlotRequest {
    pub room_id: u32,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct UnblockResponse {
    pub removed: usize,
}

pub async fn list_blocks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<BlockedSlot>>> {
    require_admin(&state, &headers)?;
    let blocked = state.store().blocked_slots().to_vec();
    Ok(Json(blocked))
}

pub async fn block_slot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SlotRequest>,
) -> ApiResult<(StatusCode, Json<BlockedSlot>)> {
    require_admin(&state, &headers)?;
    let blocked = state
        .store()
        .block_slot(request.room_id, request.date, &request.time)?;
    Ok((StatusCode::CREATED, Json(blocked)))
}

pub async fn unblock_slot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SlotRequest>,
) -> ApiResult<Json<UnblockResponse>> {
    require_admin(&state, &headers)?;
    let removed = state
        .store()
        .unblock_slot(request.room_id, request.date, &request.time);
    Ok(Json(UnblockResponse { removed }))
}
