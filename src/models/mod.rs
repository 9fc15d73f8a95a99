pub mod booking;
pub mod purpose;
pub mod room;
pub mod time_slot;

pub use booking::{BlockedSlot, Booking, BookingStatus};
pub use purpose::Purpose;
pub use room::{Room, RoomType};
pub use time_slot::{Period, TimeSlot};
