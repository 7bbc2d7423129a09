use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{NewLessonRequest, RequestConfirmation};

/// "Find me a tutor" lead intake. No slot contention; always succeeds once
/// validation and goal resolution pass.
pub struct RequestService {
    db: SqlitePool,
}

impl RequestService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn submit(&self, req: NewLessonRequest) -> Result<RequestConfirmation, AppError> {
        req.validate()?;

        let goal = repository::find_goal_by_slug(&self.db, &req.goal)
            .await?
            .ok_or(AppError::NotFound)?;

        let request = repository::insert_lesson_request(&self.db, &req).await?;

        info!("lesson request {} for goal {}", request.id, goal.slug);

        Ok(RequestConfirmation {
            request_id: request.id,
            name: request.name,
            goal: goal.description,
            hours_per_week: request.hours_per_week,
        })
    }
}
