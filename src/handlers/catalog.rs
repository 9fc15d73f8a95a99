use crate::models::{Purpose, Room, TimeSlot};
use crate::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct PurposeView {
    pub value: Purpose,
    pub label: &'static str,
}

pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<Room>> {
    Json(state.store().catalog().rooms.clone())
}

pub async fn list_time_slots(State(state): State<Arc<AppState>>) -> Json<Vec<TimeSlot>> {
    Json(state.store().catalog().time_slots.clone())
}

pub async fn list_purposes(State(state): State<Arc<AppState>>) -> Json<Vec<PurposeView>> {
    let catalog = state.store().catalog();
    Json(
        catalog
            .purposes()
            .iter()
            .map(|&value| PurposeView {
                value,
                label: value.label(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let state = test_state();

        let (status, rooms) = send(&state, "GET", "/catalog/rooms", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rooms.as_array().unwrap().len(), 4);
        assert_eq!(rooms[2]["type"], "session");

        let (_, slots) = send(&state, "GET", "/catalog/time-slots", None, None).await;
        assert_eq!(slots[0]["time"], "09:00");
        assert_eq!(slots[8]["label"], "5:00 PM");

        let (_, purposes) = send(&state, "GET", "/catalog/purposes", None, None).await;
        assert_eq!(purposes[0]["value"], "podcast");
        assert_eq!(purposes[0]["label"], "Podcast Recording");
    }

    #[tokio::test]
    async fn test_catalog_follows_the_store() {
        use crate::admin::AdminGate;
        use crate::catalog::{parse_catalog, Catalog};
        use crate::store::BookingStore;
        use crate::AppState;
        use serde_json::json;
        use std::sync::Arc;

        let content = r#"{
            "rooms": [ { "id": 7, "name": "Booth", "subtitle": "Voice over", "type": "recording", "capacity": 1 } ],
            "time_slots": [ { "time": "08:00", "label": "8:00 AM", "period": "morning" } ]
        }"#;
        let catalog: &'static Catalog = Box::leak(Box::new(parse_catalog(content).unwrap()));
        let state = Arc::new(AppState::new(
            BookingStore::with_catalog(catalog),
            AdminGate::new(PASSWORD.to_string()),
        ));

        let (_, rooms) = send(&state, "GET", "/catalog/rooms", None, None).await;
        assert_eq!(rooms.as_array().unwrap().len(), 1);
        assert_eq!(rooms[0]["name"], "Booth");

        let (_, slots) = send(&state, "GET", "/catalog/time-slots", None, None).await;
        assert_eq!(slots, json!([{ "time": "08:00", "label": "8:00 AM", "period": "morning" }]));

        let booking = json!({
            "room_id": 7, "date": "2099-03-02", "time": "08:00",
            "name": "Jane", "email": "jane@x.edu", "purpose": "interview"
        });
        let (status, created) = send(&state, "POST", "/bookings", None, Some(booking)).await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/bookings/{}", created["id"]);
        let (_, view) = send(&state, "GET", &uri, None, None).await;
        assert_eq!(view["room_name"], "Booth");
        assert_eq!(view["slot_label"], "8:00 AM");
    }
}
