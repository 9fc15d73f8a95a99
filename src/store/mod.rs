mod error;
mod views;

pub use error::StoreError;
pub use views::{CalendarCell, CalendarRow, SlotAvailability, SlotState, Stats, WeekCalendar};

use crate::catalog::{Catalog, CATALOG};
use crate::models::{BlockedSlot, Booking, BookingStatus, Purpose};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;

const WORKDAYS_PER_WEEK: i64 = 5;

/// Owns every booking and blocked slot. All reads and writes go through here.
pub struct BookingStore {
    catalog: &'static Catalog,
    bookings: Vec<Booking>,
    blocked: Vec<BlockedSlot>,
    next_id: u64,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        Self::with_catalog(&CATALOG)
    }

    pub fn with_catalog(catalog: &'static Catalog) -> Self {
        Self {
            catalog,
            bookings: Vec::new(),
            blocked: Vec::new(),
            next_id: 1,
        }
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// True iff a booking that is not rejected holds this exact slot
    pub fn is_slot_booked(&self, room_id: u32, date: NaiveDate, time: &str) -> bool {
        self.bookings
            .iter()
            .any(|b| b.occupies(room_id, date, time) && b.status.holds_slot())
    }

    pub fn is_slot_blocked(&self, room_id: u32, date: NaiveDate, time: &str) -> bool {
        self.blocked.iter().any(|b| b.matches(room_id, date, time))
    }

    fn is_slot_free(&self, room_id: u32, date: NaiveDate, time: &str) -> bool {
        !self.is_slot_booked(room_id, date, time) && !self.is_slot_blocked(room_id, date, time)
    }

    /// Number of catalog slots that are neither booked nor blocked.
    /// A slot that is both only counts once.
    pub fn available_slot_count(&self, room_id: u32, date: NaiveDate) -> usize {
        self.catalog
            .time_slots
            .iter()
            .filter(|slot| self.is_slot_free(room_id, date, &slot.time))
            .count()
    }

    pub fn total_available_today(&self, date: NaiveDate) -> usize {
        self.catalog
            .rooms
            .iter()
            .map(|room| self.available_slot_count(room.id, date))
            .sum()
    }

    /// Request a slot. New bookings start pending and hold the slot right away,
    /// so a second request for the same slot is refused until this one is
    /// rejected or cancelled.
    pub fn create_booking(
        &mut self,
        room_id: u32,
        date: NaiveDate,
        time: &str,
        name: &str,
        email: &str,
        purpose: Purpose,
    ) -> Result<Booking, StoreError> {
        self.validate_slot(room_id, time)?;

        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("name is required".to_string()));
        }
        if email.is_empty() {
            return Err(StoreError::Validation("email is required".to_string()));
        }

        if !self.is_slot_free(room_id, date, time) {
            tracing::debug!("Refusing booking for room {} on {} at {}: slot taken", room_id, date, time);
            return Err(StoreError::SlotUnavailable {
                room_id,
                date,
                time: time.to_string(),
            });
        }

        let booking = Booking::new(
            self.allocate_id(),
            room_id,
            date,
            time.to_string(),
            name.to_string(),
            email.to_string(),
            purpose,
        );
        self.bookings.push(booking.clone());

        tracing::info!(
            "Created booking {} for room {} on {} at {} ({})",
            booking.id,
            room_id,
            date,
            time,
            purpose.as_str()
        );
        Ok(booking)
    }

    /// Requester cancellation. Only bookings that are still pending or approved
    /// and not in the past may be withdrawn; rejected ones stay on record.
    /// Absent ids are ignored.
    pub fn withdraw_booking(
        &mut self,
        id: u64,
        today: NaiveDate,
    ) -> Result<Option<Booking>, StoreError> {
        let Some(booking) = self.get_booking(id) else {
            return Ok(None);
        };
        if booking.status == BookingStatus::Rejected {
            return Err(StoreError::NotCancellable {
                id,
                reason: "it was rejected",
            });
        }
        if booking.date < today {
            return Err(StoreError::NotCancellable {
                id,
                reason: "its date has passed",
            });
        }
        Ok(self.cancel_booking(id))
    }

    /// Admin removal of a booking in any state. Absent ids are ignored.
    pub fn cancel_booking(&mut self, id: u64) -> Option<Booking> {
        let index = self.bookings.iter().position(|b| b.id == id)?;
        let removed = self.bookings.remove(index);
        tracing::info!("Removed booking {} ({})", id, removed.status);
        Some(removed)
    }

    pub fn approve_booking(&mut self, id: u64) -> Result<Booking, StoreError> {
        self.transition(id, BookingStatus::Approved)
    }

    pub fn reject_booking(&mut self, id: u64) -> Result<Booking, StoreError> {
        self.transition(id, BookingStatus::Rejected)
    }

    fn transition(&mut self, id: u64, to: BookingStatus) -> Result<Booking, StoreError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;

        match (booking.status, to) {
            (from, to) if from == to => {}
            (BookingStatus::Pending, _) => {
                booking.status = to;
                tracing::info!("Booking {} is now {}", id, to);
            }
            (from, to) => return Err(StoreError::InvalidTransition { id, from, to }),
        }

        Ok(booking.clone())
    }

    /// Mark a slot unavailable. Repeated blocks of the same slot accumulate.
    pub fn block_slot(
        &mut self,
        room_id: u32,
        date: NaiveDate,
        time: &str,
    ) -> Result<BlockedSlot, StoreError> {
        self.validate_slot(room_id, time)?;

        let blocked = BlockedSlot {
            room_id,
            date,
            time: time.to_string(),
        };
        self.blocked.push(blocked.clone());
        tracing::info!("Blocked room {} on {} at {}", room_id, date, time);
        Ok(blocked)
    }

    /// Remove every block on the slot, returning how many were removed
    pub fn unblock_slot(&mut self, room_id: u32, date: NaiveDate, time: &str) -> usize {
        let before = self.blocked.len();
        self.blocked.retain(|b| !b.matches(room_id, date, time));
        let removed = before - self.blocked.len();
        if removed > 0 {
            tracing::info!("Unblocked room {} on {} at {}", room_id, date, time);
        }
        removed
    }

    pub fn get_booking(&self, id: u64) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn bookings_for_email(&self, email: &str) -> Vec<Booking> {
        let email = email.trim();
        self.bookings
            .iter()
            .filter(|b| b.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect()
    }

    pub fn pending_bookings(&self) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .cloned()
            .collect()
    }

    pub fn blocked_slots(&self) -> &[BlockedSlot] {
        &self.blocked
    }

    /// Per-slot state of one room on one day, in catalog order.
    /// Blocked takes precedence when a slot is both booked and blocked.
    pub fn slot_statuses(
        &self,
        room_id: u32,
        date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, StoreError> {
        if self.catalog.room(room_id).is_none() {
            return Err(StoreError::Validation(format!("unknown room {}", room_id)));
        }

        Ok(self
            .catalog
            .time_slots
            .iter()
            .map(|slot| {
                let state = if self.is_slot_blocked(room_id, date, &slot.time) {
                    SlotState::Blocked
                } else if self.is_slot_booked(room_id, date, &slot.time) {
                    SlotState::Booked
                } else {
                    SlotState::Available
                };
                SlotAvailability {
                    time: slot.time.clone(),
                    label: slot.label.clone(),
                    period: slot.period,
                    state,
                }
            })
            .collect())
    }

    /// Approved bookings on a date, earliest first
    pub fn approved_schedule(&self, date: NaiveDate) -> Vec<Booking> {
        let mut schedule: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.date == date && b.status == BookingStatus::Approved)
            .cloned()
            .collect();
        schedule.sort_by(|a, b| a.time.cmp(&b.time).then(a.room_id.cmp(&b.room_id)));
        schedule
    }

    pub fn week_calendar(&self, date: NaiveDate) -> WeekCalendar {
        let week_start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let dates: Vec<NaiveDate> = (0..WORKDAYS_PER_WEEK)
            .map(|offset| week_start + Duration::days(offset))
            .collect();

        let rows = self
            .catalog
            .rooms
            .iter()
            .map(|room| CalendarRow {
                room_id: room.id,
                room_name: room.name.clone(),
                days: dates
                    .iter()
                    .map(|&day| {
                        let mut bookings: Vec<Booking> = self
                            .bookings
                            .iter()
                            .filter(|b| {
                                b.room_id == room.id
                                    && b.date == day
                                    && b.status == BookingStatus::Approved
                            })
                            .cloned()
                            .collect();
                        bookings.sort_by(|a, b| a.time.cmp(&b.time));
                        CalendarCell { date: day, bookings }
                    })
                    .collect(),
            })
            .collect();

        WeekCalendar {
            week_start,
            dates,
            rows,
        }
    }

    pub fn stats(&self, date: NaiveDate) -> Stats {
        Stats {
            date,
            rooms: self.catalog.rooms.len(),
            available_slots: self.total_available_today(date),
            active_bookings: self.bookings.iter().filter(|b| b.status.holds_slot()).count(),
            pending_bookings: self
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
        }
    }

    /// Load pre-existing bookings, keeping their ids and statuses.
    /// The same reference and double-booking checks as `create_booking` apply,
    /// and the whole batch is checked before any of it is inserted.
    pub fn seed(&mut self, bookings: Vec<Booking>) -> Result<usize, StoreError> {
        let mut ids: HashSet<u64> = self.bookings.iter().map(|b| b.id).collect();
        let mut held: HashSet<(u32, NaiveDate, &str)> = self
            .bookings
            .iter()
            .filter(|b| b.status.holds_slot())
            .map(|b| (b.room_id, b.date, b.time.as_str()))
            .collect();
        let mut next_id = self.next_id;

        for booking in &bookings {
            self.validate_slot(booking.room_id, &booking.time)?;
            if !ids.insert(booking.id) {
                return Err(StoreError::Validation(format!(
                    "duplicate booking id {}",
                    booking.id
                )));
            }
            if booking.status.holds_slot()
                && !held.insert((booking.room_id, booking.date, booking.time.as_str()))
            {
                return Err(StoreError::SlotUnavailable {
                    room_id: booking.room_id,
                    date: booking.date,
                    time: booking.time.clone(),
                });
            }
            let after = booking.id.checked_add(1).ok_or_else(|| {
                StoreError::Validation(format!("booking id {} is out of range", booking.id))
            })?;
            next_id = next_id.max(after);
        }

        let count = bookings.len();
        self.next_id = next_id;
        self.bookings.extend(bookings);
        Ok(count)
    }

    fn validate_slot(&self, room_id: u32, time: &str) -> Result<(), StoreError> {
        if self.catalog.room(room_id).is_none() {
            return Err(StoreError::Validation(format!("unknown room {}", room_id)));
        }
        if self.catalog.time_slot(time).is_none() {
            return Err(StoreError::Validation(format!("unknown time slot {}", time)));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
