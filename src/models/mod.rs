pub mod booking;
pub mod request;
pub mod schedule;
pub mod tutor;

pub use booking::{Booking, BookingConfirmation, NewBookingRequest};
pub use request::{LessonRequest, NewLessonRequest, RequestConfirmation, TimeBudget};
pub use schedule::{Schedule, SlotError, SlotStatus, Weekday};
pub use tutor::{Goal, Tutor};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Digit-ish phone number, at least 10 characters.
    pub static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9()\-\s]{10,20}$").unwrap();
    /// 24-hour HH:MM, the same shape the bookings table CHECK enforces.
    pub static ref TIME_RE: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}
