use serde::Serialize;
use time::Date;

use crate::day::serde_day;
use crate::energy::{CalorieResult, SeasonFactor};

#[derive(Debug, Serialize)]
pub struct TargetResponse {
    #[serde(with = "serde_day")]
    pub day: Date,
    /// Season actually applied, never `auto`.
    pub season: SeasonFactor,
    #[serde(flatten)]
    pub result: CalorieResult,
}
