use crate::models::{Booking, Period};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Available,
    Booked,
    Blocked,
}

/// One cell of the per-room slot grid for a single day
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub time: String,
    pub label: String,
    pub period: Period,
    pub state: SlotState,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarRow {
    pub room_id: u32,
    pub room_name: String,
    pub days: Vec<CalendarCell>,
}

/// Approved bookings for the Monday-Friday week around a date
#[derive(Debug, Clone, Serialize)]
pub struct WeekCalendar {
    pub week_start: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<CalendarRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub date: NaiveDate,
    pub rooms: usize,
    pub available_slots: usize,
    pub active_bookings: usize,
    pub pending_bookings: usize,
}
