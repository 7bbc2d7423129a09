use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::PHONE_RE;

/// Weekly study-time buckets offered on the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TimeBudget {
    #[serde(rename = "1-2")]
    #[sqlx(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-5")]
    #[sqlx(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-7")]
    #[sqlx(rename = "5-7")]
    FiveToSeven,
    #[serde(rename = "7-10")]
    #[sqlx(rename = "7-10")]
    SevenToTen,
}

/// Persisted "find me a tutor" lead. Purely additive, no uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonRequest {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub goal_slug: String,
    pub hours_per_week: TimeBudget,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLessonRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
    #[validate(regex(path = *PHONE_RE, message = "phone must contain at least 10 digits"))]
    pub phone: String,
    pub goal: String,
    pub hours_per_week: TimeBudget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfirmation {
    pub request_id: String,
    pub name: String,
    pub goal: String,
    pub hours_per_week: TimeBudget,
}
