use sqlx::FromRow;

use crate::energy::{ActivityLevel, DogProfile, Environment, GoalMode, LifeStage, SeasonFactor};

/// Raw `dogs` row. Enum columns are free text; unknown values fall back to defaults.
#[derive(Debug, FromRow)]
pub struct DogRow {
    pub weight_kg: f64,
    pub target_weight_kg: Option<f64>,
    pub neutered: bool,
    pub activity_level: Option<String>,
    pub bcs: Option<i32>,
    pub life_stage: Option<String>,
    pub environment: Option<String>,
    pub season_factor: Option<String>,
    pub goal_mode: Option<String>,
    pub weekly_loss_rate_pct: Option<f64>,
    pub breed: Option<String>,
}

impl From<DogRow> for DogProfile {
    fn from(r: DogRow) -> Self {
        Self {
            weight_kg: r.weight_kg,
            target_weight_kg: r.target_weight_kg.unwrap_or(r.weight_kg),
            neutered: r.neutered,
            activity_level: ActivityLevel::parse_or_default(r.activity_level.as_deref()),
            bcs: r.bcs.map(|b| b.clamp(1, 9) as u8).unwrap_or(5),
            life_stage: LifeStage::parse_or_default(r.life_stage.as_deref()),
            environment: Environment::parse_or_default(r.environment.as_deref()),
            season_factor: SeasonFactor::parse_or_default(r.season_factor.as_deref()),
            goal_mode: GoalMode::parse_or_default(r.goal_mode.as_deref()),
            weekly_loss_rate_pct: r.weekly_loss_rate_pct.unwrap_or(0.75),
            breed: r.breed,
        }
    }
}
