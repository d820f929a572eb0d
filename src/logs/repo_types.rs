use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::day::serde_day;

/// Logged meal. `kcal` may be missing on rows written by older clients.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct MealEvent {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub kind: String,
    pub label: String,
    pub grams: f64,
    pub kcal: Option<f64>,
    #[serde(with = "serde_day")]
    pub day: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub dog_id: Uuid,
    pub kind: String,
    pub label: String,
    pub minutes: f64,
    pub kcal: Option<f64>,
    #[serde(with = "serde_day")]
    pub day: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub kind: String,
    pub label: String,
    pub grams: f64,
    pub kcal: f64,
    pub day: Date,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: String,
    pub label: String,
    pub minutes: f64,
    pub kcal: f64,
    pub day: Date,
}

impl MealEvent {
    pub fn energy(&self) -> f64 {
        finite_or_zero(self.kcal)
    }
}

impl ActivityEvent {
    pub fn energy(&self) -> f64 {
        finite_or_zero(self.kcal)
    }
}

// missing, non-numeric or negative energy counts as nothing
fn finite_or_zero(kcal: Option<f64>) -> f64 {
    kcal.filter(|k| k.is_finite() && *k > 0.0).unwrap_or(0.0)
}
