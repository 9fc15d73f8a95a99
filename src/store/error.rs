use crate::models::BookingStatus;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Slot {time} on {date} in room {room_id} is not available")]
    SlotUnavailable {
        room_id: u32,
        date: NaiveDate,
        time: String,
    },

    #[error("Booking {0} not found")]
    NotFound(u64),

    #[error("Booking {id} can no longer be cancelled: {reason}")]
    NotCancellable { id: u64, reason: &'static str },

    #[error("Booking {id} is {from} and cannot become {to}")]
    InvalidTransition {
        id: u64,
        from: BookingStatus,
        to: BookingStatus,
    },
}
