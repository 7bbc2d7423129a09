use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{PHONE_RE, TIME_RE, Weekday};

/// Persisted trial-lesson booking. The (tutor_id, weekday, time) triple is
/// unique and its slot reads taken for as long as the row exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: String,
    pub tutor_id: i64,
    pub weekday: Weekday,
    pub time: String,
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBookingRequest {
    pub weekday: Weekday,
    #[validate(regex(path = *TIME_RE, message = "time must be HH:MM in 24-hour format"))]
    pub time: String,
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    #[validate(regex(path = *PHONE_RE, message = "phone must contain at least 10 digits"))]
    pub phone: String,
}

/// Returned directly from the booking call; the client renders it without
/// any server-side session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub tutor_id: i64,
    pub tutor_name: String,
    pub weekday: String,
    pub time: String,
    pub name: String,
}
