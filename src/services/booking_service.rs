use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::db::repository::{self, BookingOutcome};
use crate::error::AppError;
use crate::models::{BookingConfirmation, NewBookingRequest};

/// Trial-lesson booking intake: validate, resolve the tutor, reserve the
/// slot and persist the booking in one transaction.
pub struct BookingService {
    db: SqlitePool,
}

impl BookingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn book_slot(
        &self,
        tutor_id: i64,
        req: NewBookingRequest,
    ) -> Result<BookingConfirmation, AppError> {
        req.validate()?;

        let tutor = repository::find_tutor_by_id(&self.db, tutor_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let booking = match repository::create_booking(&self.db, tutor_id, &req).await? {
            BookingOutcome::Created(booking) => booking,
            BookingOutcome::SlotTaken => {
                return Err(AppError::Conflict("Slot is no longer available".to_string()));
            }
            // tutor deleted mid-request counts as an unknown slot too
            BookingOutcome::SlotUnknown | BookingOutcome::TutorNotFound => {
                return Err(AppError::NotFound);
            }
        };

        info!(
            "booked tutor {} for {} {}",
            tutor_id, booking.weekday, booking.time
        );

        Ok(BookingConfirmation {
            booking_id: booking.id,
            tutor_id: tutor.id,
            tutor_name: tutor.name,
            weekday: booking.weekday.label().to_string(),
            time: booking.time,
            name: booking.name,
        })
    }
}
