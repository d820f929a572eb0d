use serde::{Deserialize, Serialize};
use time::Date;

use super::presets::{ActivityPreset, FoodPreset};
use super::repo_types::{ActivityEvent, MealEvent};
use crate::day::serde_day;
use crate::summaries::repo_types::DailySummary;

/// Either `preset` or a custom `kcal_per_100g` (with an optional label).
#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub preset: Option<String>,
    pub label: Option<String>,
    pub kcal_per_100g: Option<f64>,
    pub grams: f64,
    #[serde(default, with = "serde_day::option")]
    pub day: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    pub preset: Option<String>,
    pub label: Option<String>,
    pub kcal_per_kg_per_hour: Option<f64>,
    pub minutes: f64,
    #[serde(default, with = "serde_day::option")]
    pub day: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct LoggedMealResponse {
    pub meal: MealEvent,
    pub summary: DailySummary,
}

#[derive(Debug, Serialize)]
pub struct LoggedActivityResponse {
    pub activity: ActivityEvent,
    pub summary: DailySummary,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DayLogsResponse {
    #[serde(with = "serde_day")]
    pub day: Date,
    pub meals: Vec<MealEvent>,
    pub activities: Vec<ActivityEvent>,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub foods: &'static [FoodPreset],
    pub activities: &'static [ActivityPreset],
}
