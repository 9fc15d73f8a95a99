use crate::models::{Purpose, Room, TimeSlot};
use serde::Deserialize;

/// Static reference data: the bookable rooms and the fixed daily slots
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    pub rooms: Vec<Room>,
    pub time_slots: Vec<TimeSlot>,
}

impl Catalog {
    pub fn room(&self, room_id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn time_slot(&self, time: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| s.time == time)
    }

    pub fn purposes(&self) -> &'static [Purpose] {
        &Purpose::ALL
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate room id: {0}")]
    DuplicateRoom(u32),

    #[error("Invalid room {0}: id and capacity must be positive")]
    InvalidRoom(u32),

    #[error("Invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error("Time slots out of order at {0}")]
    UnorderedTimeSlots(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
