use super::{require_admin, ApiResult};
use crate::catalog::Catalog;
use crate::models::{Booking, Purpose};
use crate::store::StoreError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: u32,
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub email: String,
    pub purpose: Purpose,
}

#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    pub email: Option<String>,
}

/// Booking plus the catalog details a listing needs to display it
#[derive(Debug, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub room_name: Option<String>,
    pub slot_label: Option<String>,
    pub purpose_label: &'static str,
    pub is_past: bool,
}

impl BookingView {
    fn new(booking: Booking, catalog: &Catalog, today: NaiveDate) -> Self {
        Self {
            room_name: catalog.room(booking.room_id).map(|r| r.name.clone()),
            slot_label: catalog.time_slot(&booking.time).map(|s| s.label.clone()),
            purpose_label: booking.purpose.label(),
            is_past: booking.date < today,
            booking,
        }
    }
}

fn to_views(catalog: &Catalog, bookings: Vec<Booking>) -> Vec<BookingView> {
    let today = chrono::Local::now().date_naive();
    bookings
        .into_iter()
        .map(|b| BookingView::new(b, catalog, today))
        .collect()
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> Json<Vec<BookingView>> {
    let (catalog, bookings) = {
        let store = state.store();
        let bookings = match filter.email.as_deref() {
            Some(email) => store.bookings_for_email(email),
            None => store.bookings().to_vec(),
        };
        (store.catalog(), bookings)
    };
    Json(to_views(catalog, bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<Json<BookingView>> {
    let (catalog, booking) = {
        let store = state.store();
        (store.catalog(), store.get_booking(id).cloned())
    };
    let booking = booking.ok_or(StoreError::NotFound(id))?;
    Ok(Json(BookingView::new(
        booking,
        catalog,
        chrono::Local::now().date_naive(),
    )))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    tracing::info!(
        "Booking request for room {} on {} at {} from {}",
        request.room_id,
        request.date,
        request.time,
        request.email
    );

    let booking = state.store().create_booking(
        request.room_id,
        request.date,
        &request.time,
        &request.name,
        &request.email,
        request.purpose,
    )?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Requester cancellation of an upcoming pending or approved booking.
/// Cancelling an unknown or already removed booking succeeds.
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    let today = chrono::Local::now().date_naive();
    if state.store().withdraw_booking(id, today)?.is_none() {
        tracing::debug!("Cancel for unknown booking {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> ApiResult<Json<Booking>> {
    require_admin(&state, &headers)?;
    let booking = state.store().approve_booking(id)?;
    Ok(Json(booking))
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> ApiResult<Json<Booking>> {
    require_admin(&state, &headers)?;
    let booking = state.store().reject_booking(id)?;
    Ok(Json(booking))
}

/// Admin removal of a booking in any state
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> ApiResult<StatusCode> {
    require_admin(&state, &headers)?;
    state.store().cancel_booking(id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pending_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<BookingView>>> {
    require_admin(&state, &headers)?;
    let store = state.store();
    let pending = store.pending_bookings();
    Ok(Json(to_views(store.catalog(), pending)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn request(room_id: u32, date: &str, time: &str) -> Value {
        json!({
            "room_id": room_id, "date": date, "time": time,
            "name": "Jane", "email": "jane@x.edu", "purpose": "podcast"
        })
    }

    async fn create(state: &Arc<crate::AppState>, room_id: u32, date: &str, time: &str) -> u64 {
        let (status, body) =
            send(state, "POST", "/bookings", None, Some(request(room_id, date, time))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_create_booking_is_pending() {
        let state = test_state();
        let (status, body) =
            send(&state, "POST", "/bookings", None, Some(request(1, "2025-02-01", "09:00"))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["room_id"], 1);
        assert_eq!(body["time"], "09:00");
    }

    #[tokio::test]
    async fn test_conflicting_request_is_refused() {
        let state = test_state();
        create(&state, 1, "2025-02-01", "09:00").await;

        let (status, body) =
            send(&state, "POST", "/bookings", None, Some(request(1, "2025-02-01", "09:00"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("not available"));
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let state = test_state();

        let (status, _) =
            send(&state, "POST", "/bookings", None, Some(request(9, "2025-02-01", "09:00"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut blank = request(1, "2025-02-01", "09:00");
        blank["name"] = json!("");
        let (status, _) = send(&state, "POST", "/bookings", None, Some(blank)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Unknown purpose fails JSON extraction
        let mut bad_purpose = request(1, "2025-02-01", "09:00");
        bad_purpose["purpose"] = json!("karaoke");
        let (status, _) = send(&state, "POST", "/bookings", None, Some(bad_purpose)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, all) = send(&state, "GET", "/bookings", None, None).await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let state = test_state();
        let id = create(&state, 2, "2099-02-02", "15:00").await;
        let uri = format!("/bookings/{}/cancel", id);

        let (status, body) = send(&state, "GET", &format!("/bookings/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["room_name"], "Recording Room 2");

        let (status, _) = send(&state, "POST", &uri, None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&state, "POST", &uri, None, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&state, "GET", &format!("/bookings/{}", id), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, all) = send(&state, "GET", "/bookings", None, None).await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn test_requester_cannot_cancel_rejected_booking() {
        let state = test_state();
        let token = admin_token(&state);
        let id = create(&state, 1, "2099-02-02", "09:00").await;

        let uri = format!("/bookings/{}/reject", id);
        let (status, _) = send(&state, "POST", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("/bookings/{}/cancel", id);
        let (status, body) = send(&state, "POST", &uri, None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("rejected"));

        // The rejected record is kept
        let (_, all) = send(&state, "GET", "/bookings", None, None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(all[0]["id"], id);
        assert_eq!(all[0]["status"], "rejected");

        // An admin can still remove it
        let uri = format!("/admin/bookings/{}", id);
        let (status, _) = send(&state, "DELETE", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, all) = send(&state, "GET", "/bookings", None, None).await;
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn test_requester_cannot_cancel_past_booking() {
        let state = test_state();
        let id = create(&state, 3, "2025-02-01", "11:00").await;

        let uri = format!("/bookings/{}/cancel", id);
        let (status, _) = send(&state, "POST", &uri, None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&state, "GET", &format!("/bookings/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_moderation_requires_admin() {
        let state = test_state();
        let id = create(&state, 1, "2025-02-01", "09:00").await;

        let uri = format!("/bookings/{}/approve", id);
        let (status, _) = send(&state, "POST", &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&state, "POST", &uri, Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&state, "GET", "/admin/pending", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let uri = format!("/admin/bookings/{}", id);
        let (status, _) = send(&state, "DELETE", &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_approve_and_reject() {
        let state = test_state();
        let token = admin_token(&state);
        let approved = create(&state, 1, "2025-02-01", "09:00").await;
        let rejected = create(&state, 1, "2025-02-01", "10:00").await;

        let (_, pending) = send(&state, "GET", "/admin/pending", Some(token.as_str()), None).await;
        assert_eq!(pending.as_array().unwrap().len(), 2);
        assert_eq!(pending[0]["room_name"], "Recording Room 1");
        assert_eq!(pending[0]["purpose_label"], "Podcast Recording");

        let uri = format!("/bookings/{}/approve", approved);
        let (status, body) = send(&state, "POST", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "approved");

        let uri = format!("/bookings/{}/reject", rejected);
        let (status, body) = send(&state, "POST", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "rejected");

        // Approved is terminal
        let uri = format!("/bookings/{}/reject", approved);
        let (status, _) = send(&state, "POST", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) =
            send(&state, "GET", "/availability?room=1&date=2025-02-01", None, None).await;
        assert_eq!(body["available"], 8);

        let (status, _) = send(&state, "POST", "/bookings/999/approve", Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_delete_and_email_filter() {
        let state = test_state();
        let token = admin_token(&state);
        let id = create(&state, 4, "2025-02-01", "16:00").await;

        let other = json!({
            "room_id": 4, "date": "2025-02-01", "time": "17:00",
            "name": "Bob", "email": "bob@x.edu", "purpose": "meeting"
        });
        send(&state, "POST", "/bookings", None, Some(other)).await;

        let (_, mine) = send(&state, "GET", "/bookings?email=JANE@x.edu", None, None).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);
        assert_eq!(mine[0]["id"], id);
        assert_eq!(mine[0]["slot_label"], "4:00 PM");
        assert_eq!(mine[0]["is_past"], true);

        let uri = format!("/admin/bookings/{}", id);
        let (status, _) = send(&state, "DELETE", &uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, all) = send(&state, "GET", "/bookings", None, None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
        assert_eq!(all[0]["name"], "Bob");
    }
}
