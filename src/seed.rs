use std::path::Path;

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::db::repository;
use crate::models::{Goal, Tutor};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    goals: Vec<Goal>,
    tutors: Vec<Tutor>,
}

/// Loads the flat-file catalog into the database once. A non-empty catalog
/// is left alone, so restarts never clobber booked-up schedules.
pub async fn seed_if_empty(db: &SqlitePool, path: &Path) -> Result<(), SeedError> {
    if repository::count_tutors(db).await? > 0 {
        info!("catalog already seeded, skipping {}", path.display());
        return Ok(());
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_json::from_str(&raw)?;

    for goal in &seed.goals {
        repository::insert_goal(db, goal).await?;
    }
    for tutor in &seed.tutors {
        repository::insert_tutor(db, tutor).await?;
    }

    info!(
        "seeded {} goals and {} tutors from {}",
        seed.goals.len(),
        seed.tutors.len(),
        path.display()
    );
    Ok(())
}
