pub mod booking_service;
pub mod catalog;
pub mod request_service;

pub use booking_service::BookingService;
pub use catalog::{TutorSort, sample_tutors, sort_tutors};
pub use request_service::RequestService;
