use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{
    Booking, Goal, LessonRequest, NewBookingRequest, NewLessonRequest, Schedule, SlotError, Tutor,
    Weekday,
};

/// Result of the transactional reserve-and-insert write path. The service
/// layer maps these onto the error taxonomy.
#[derive(Debug)]
pub enum BookingOutcome {
    Created(Booking),
    SlotTaken,
    SlotUnknown,
    TutorNotFound,
}

#[derive(sqlx::FromRow)]
struct TutorRow {
    id: i64,
    name: String,
    about: String,
    rating: f64,
    picture: String,
    price: i64,
    schedule: Json<Schedule>,
}

impl TutorRow {
    fn into_tutor(self, goals: Vec<String>) -> Tutor {
        Tutor {
            id: self.id,
            name: self.name,
            about: self.about,
            rating: self.rating,
            picture: self.picture,
            price: self.price,
            goals,
            schedule: self.schedule.0,
        }
    }
}

pub async fn fetch_tutors(db: &SqlitePool) -> Result<Vec<Tutor>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TutorRow>(
        "SELECT id, name, about, rating, picture, price, schedule FROM tutors ORDER BY id",
    )
    .fetch_all(db)
    .await?;

    attach_goals(db, rows).await
}

pub async fn fetch_tutors_by_goal(db: &SqlitePool, slug: &str) -> Result<Vec<Tutor>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TutorRow>(
        "SELECT t.id, t.name, t.about, t.rating, t.picture, t.price, t.schedule
         FROM tutors t
         JOIN tutor_goals tg ON tg.tutor_id = t.id
         WHERE tg.goal_slug = ?
         ORDER BY t.id",
    )
    .bind(slug)
    .fetch_all(db)
    .await?;

    attach_goals(db, rows).await
}

pub async fn find_tutor_by_id(db: &SqlitePool, id: i64) -> Result<Option<Tutor>, sqlx::Error> {
    let row = sqlx::query_as::<_, TutorRow>(
        "SELECT id, name, about, rating, picture, price, schedule FROM tutors WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let goals = sqlx::query_scalar::<_, String>(
        "SELECT goal_slug FROM tutor_goals WHERE tutor_id = ? ORDER BY goal_slug",
    )
    .bind(id)
    .fetch_all(db)
    .await?;

    Ok(Some(row.into_tutor(goals)))
}

async fn attach_goals(db: &SqlitePool, rows: Vec<TutorRow>) -> Result<Vec<Tutor>, sqlx::Error> {
    let links = sqlx::query_as::<_, (i64, String)>(
        "SELECT tutor_id, goal_slug FROM tutor_goals ORDER BY goal_slug",
    )
    .fetch_all(db)
    .await?;

    let mut goals_by_tutor: HashMap<i64, Vec<String>> = HashMap::new();
    for (tutor_id, slug) in links {
        goals_by_tutor.entry(tutor_id).or_default().push(slug);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let goals = goals_by_tutor.remove(&row.id).unwrap_or_default();
            row.into_tutor(goals)
        })
        .collect())
}

pub async fn fetch_goals(db: &SqlitePool) -> Result<Vec<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT slug, description, icon FROM goals ORDER BY slug")
        .fetch_all(db)
        .await
}

pub async fn find_goal_by_slug(db: &SqlitePool, slug: &str) -> Result<Option<Goal>, sqlx::Error> {
    sqlx::query_as::<_, Goal>("SELECT slug, description, icon FROM goals WHERE slug = ?")
        .bind(slug)
        .fetch_optional(db)
        .await
}

pub async fn count_tutors(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tutors")
        .fetch_one(db)
        .await
}

pub async fn insert_goal(db: &SqlitePool, goal: &Goal) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO goals (slug, description, icon) VALUES (?, ?, ?)")
        .bind(&goal.slug)
        .bind(&goal.description)
        .bind(&goal.icon)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn insert_tutor(db: &SqlitePool, tutor: &Tutor) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tutors (id, name, about, rating, picture, price, schedule)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(tutor.id)
    .bind(&tutor.name)
    .bind(&tutor.about)
    .bind(tutor.rating)
    .bind(&tutor.picture)
    .bind(tutor.price)
    .bind(Json(&tutor.schedule))
    .execute(db)
    .await?;

    for slug in &tutor.goals {
        sqlx::query("INSERT INTO tutor_goals (tutor_id, goal_slug) VALUES (?, ?)")
            .bind(tutor.id)
            .bind(slug)
            .execute(db)
            .await?;
    }

    Ok(())
}

/// Reserves the slot and persists the booking as one transaction.
///
/// Any early return before the commit drops the transaction and rolls the
/// schedule change back; a unique-index violation on the insert means a
/// racing booking already claimed the slot.
pub async fn create_booking(
    db: &SqlitePool,
    tutor_id: i64,
    req: &NewBookingRequest,
) -> Result<BookingOutcome, sqlx::Error> {
    let mut tx = db.begin().await?;

    let schedule =
        sqlx::query_scalar::<_, Json<Schedule>>("SELECT schedule FROM tutors WHERE id = ?")
            .bind(tutor_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(Json(mut schedule)) = schedule else {
        return Ok(BookingOutcome::TutorNotFound);
    };

    match schedule.reserve(req.weekday, &req.time) {
        Ok(()) => {}
        Err(SlotError::AlreadyTaken) => return Ok(BookingOutcome::SlotTaken),
        Err(SlotError::Unknown) => return Ok(BookingOutcome::SlotUnknown),
    }

    sqlx::query("UPDATE tutors SET schedule = ? WHERE id = ?")
        .bind(Json(&schedule))
        .bind(tutor_id)
        .execute(&mut *tx)
        .await?;

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        tutor_id,
        weekday: req.weekday,
        time: req.time.clone(),
        name: req.name.clone(),
        phone: req.phone.clone(),
        created_at: Utc::now().to_rfc3339(),
    };

    let inserted = sqlx::query(
        "INSERT INTO bookings (id, tutor_id, weekday, time, name, phone, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&booking.id)
    .bind(booking.tutor_id)
    .bind(booking.weekday)
    .bind(&booking.time)
    .bind(&booking.name)
    .bind(&booking.phone)
    .bind(&booking.created_at)
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => return Ok(BookingOutcome::SlotTaken),
        Err(e) => return Err(e),
    }

    tx.commit().await?;
    Ok(BookingOutcome::Created(booking))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub async fn find_booking(
    db: &SqlitePool,
    tutor_id: i64,
    weekday: Weekday,
    time: &str,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as::<_, Booking>(
        "SELECT id, tutor_id, weekday, time, name, phone, created_at
         FROM bookings
         WHERE tutor_id = ? AND weekday = ? AND time = ?",
    )
    .bind(tutor_id)
    .bind(weekday)
    .bind(time)
    .fetch_optional(db)
    .await
}

pub async fn insert_lesson_request(
    db: &SqlitePool,
    req: &NewLessonRequest,
) -> Result<LessonRequest, sqlx::Error> {
    let request = LessonRequest {
        id: Uuid::new_v4().to_string(),
        name: req.name.clone(),
        phone: req.phone.clone(),
        goal_slug: req.goal.clone(),
        hours_per_week: req.hours_per_week,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO lesson_requests (id, name, phone, goal_slug, hours_per_week, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&request.id)
    .bind(&request.name)
    .bind(&request.phone)
    .bind(&request.goal_slug)
    .bind(request.hours_per_week)
    .bind(&request.created_at)
    .execute(db)
    .await?;

    Ok(request)
}
