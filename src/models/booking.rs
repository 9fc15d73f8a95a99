use super::Purpose;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Rejected bookings stay on record but no longer hold their slot
    pub fn holds_slot(&self) -> bool {
        !matches!(self, BookingStatus::Rejected)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    pub room_id: u32,
    pub date: NaiveDate,
    pub time: String,
    pub name: String,
    pub email: String,
    pub purpose: Purpose,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(
        id: u64,
        room_id: u32,
        date: NaiveDate,
        time: String,
        name: String,
        email: String,
        purpose: Purpose,
    ) -> Self {
        Self {
            id,
            room_id,
            date,
            time,
            name,
            email,
            purpose,
            status: BookingStatus::Pending,
        }
    }

    pub fn occupies(&self, room_id: u32, date: NaiveDate, time: &str) -> bool {
        self.room_id == room_id && self.date == date && self.time == time
    }
}

/// Admin-imposed unavailability for one (room, date, time) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedSlot {
    pub room_id: u32,
    pub date: NaiveDate,
    pub time: String,
}

impl BlockedSlot {
    pub fn matches(&self, room_id: u32, date: NaiveDate, time: &str) -> bool {
        self.room_id == room_id && self.date == date && self.time == time
    }
}
