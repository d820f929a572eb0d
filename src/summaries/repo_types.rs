use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use crate::day::serde_day;

/// One energy summary per dog per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailySummary {
    #[serde(with = "serde_day")]
    pub day: Date,
    pub calories_in: i64,
    pub calories_out: i64,
    pub net: i64,
    pub target: i64,
    pub delta: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
