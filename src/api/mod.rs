use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{BookingConfirmation, Goal, NewBookingRequest, NewLessonRequest, RequestConfirmation, Tutor};
use crate::services::{self, BookingService, RequestService, TutorSort};
use crate::state::AppState;

#[derive(Deserialize)]
struct TutorListParams {
    goal: Option<String>,
    sort: Option<TutorSort>,
}

#[derive(Deserialize)]
struct FeaturedParams {
    #[serde(default = "default_featured_count")]
    count: usize,
}

fn default_featured_count() -> usize {
    6
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/goals", get(list_goals))
        .route("/tutors", get(list_tutors))
        .route("/tutors/featured", get(featured_tutors))
        .route("/tutors/{id}", get(get_tutor))
        .route("/tutors/{id}/book", post(book_slot))
        .route("/requests", post(submit_request))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_goals(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = repository::fetch_goals(&state.db).await?;
    Ok(Json(goals))
}

async fn list_tutors(
    State(state): State<AppState>,
    Query(params): Query<TutorListParams>,
) -> Result<Json<Vec<Tutor>>, AppError> {
    let mut tutors = match params.goal {
        Some(slug) => {
            // unknown goal is a 404; a known goal nobody serves is an empty list
            repository::find_goal_by_slug(&state.db, &slug)
                .await?
                .ok_or(AppError::NotFound)?;
            repository::fetch_tutors_by_goal(&state.db, &slug).await?
        }
        None => repository::fetch_tutors(&state.db).await?,
    };

    if let Some(sort) = params.sort {
        services::sort_tutors(&mut tutors, sort);
    }

    Ok(Json(tutors))
}

async fn featured_tutors(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> Result<Json<Vec<Tutor>>, AppError> {
    let tutors = repository::fetch_tutors(&state.db).await?;
    Ok(Json(services::sample_tutors(&tutors, params.count)))
}

async fn get_tutor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tutor>, AppError> {
    let tutor = repository::find_tutor_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(tutor))
}

async fn book_slot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewBookingRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let service = BookingService::new(state.db.clone());
    let confirmation = service.book_slot(id, req).await?;
    Ok(Json(confirmation))
}

async fn submit_request(
    State(state): State<AppState>,
    Json(req): Json<NewLessonRequest>,
) -> Result<Json<RequestConfirmation>, AppError> {
    let service = RequestService::new(state.db.clone());
    let confirmation = service.submit(req).await?;
    Ok(Json(confirmation))
}
