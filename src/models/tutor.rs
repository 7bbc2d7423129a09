use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::Schedule;

/// Catalog entry for a tutor. Everything except `schedule` is read-only
/// reference data once the catalog is seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub rating: f64,
    pub picture: String,
    pub price: i64,
    pub goals: Vec<String>,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub slug: String,
    pub description: String,
    pub icon: String,
}
