use super::ApiResult;
use crate::models::Booking;
use crate::store::{SlotAvailability, Stats, StoreError, WeekCalendar};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RoomDateQuery {
    pub room: u32,
    pub date: NaiveDate,
}

/// Optional `?date=`; falls back to today's local date
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    fn date_or_today(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Debug, Serialize)]
pub struct RoomAvailability {
    pub room_id: u32,
    pub date: NaiveDate,
    pub available: usize,
}

#[derive(Debug, Serialize)]
pub struct TotalAvailability {
    pub date: NaiveDate,
    pub available: usize,
}

pub async fn room_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomDateQuery>,
) -> ApiResult<Json<RoomAvailability>> {
    let store = state.store();
    if store.catalog().room(query.room).is_none() {
        return Err(StoreError::Validation(format!("unknown room {}", query.room)).into());
    }

    Ok(Json(RoomAvailability {
        room_id: query.room,
        date: query.date,
        available: store.available_slot_count(query.room, query.date),
    }))
}

pub async fn total_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Json<TotalAvailability> {
    let date = query.date_or_today();
    Json(TotalAvailability {
        date,
        available: state.store().total_available_today(date),
    })
}

pub async fn room_slots(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<u32>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Vec<SlotAvailability>>> {
    let slots = state.store().slot_statuses(room_id, query.date_or_today())?;
    Ok(Json(slots))
}

pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Json<Vec<Booking>> {
    Json(state.store().approved_schedule(query.date_or_today()))
}

pub async fn calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Json<WeekCalendar> {
    Json(state.store().week_calendar(query.date_or_today()))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Json<Stats> {
    Json(state.store().stats(query.date_or_today()))
}
