mod admin;
mod availability;
mod blocks;
mod bookings;
mod catalog;

use crate::admin::AuthError;
use crate::store::StoreError;
use crate::AppState;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/catalog/rooms", get(catalog::list_rooms))
        .route("/catalog/time-slots", get(catalog::list_time_slots))
        .route("/catalog/purposes", get(catalog::list_purposes))
        .route("/availability", get(availability::room_availability))
        .route("/availability/total", get(availability::total_availability))
        .route("/rooms/:id/slots", get(availability::room_slots))
        .route("/schedule", get(availability::schedule))
        .route("/calendar", get(availability::calendar))
        .route("/stats", get(availability::stats))
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/bookings/:id/approve", post(bookings::approve_booking))
        .route("/bookings/:id/reject", post(bookings::reject_booking))
        .route("/admin/bookings/:id", delete(bookings::delete_booking))
        .route("/admin/pending", get(bookings::pending_bookings))
        .route("/admin/login", post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route(
            "/blocks",
            get(blocks::list_blocks)
                .post(blocks::block_slot)
                .delete(blocks::unblock_slot),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Error returned by every API handler, rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::SlotUnavailable { .. }) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::NotCancellable { .. }) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Request refused ({}): {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Resolve the admin session from the `Authorization: Bearer` header
pub(crate) fn require_admin(state: &AppState, headers: &HeaderMap) -> ApiResult<Uuid> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Ok(state.admin().authorize(header)?)
}
