use serde::{Deserialize, Serialize};
use time::Date;

use crate::day::month_number;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LifeStage {
    Puppy,
    #[default]
    Adult,
    Senior,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Indoor,
    Outdoor,
    Mixed,
}

/// Season setting on the profile. `Auto` is resolved from the calendar by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeasonFactor {
    #[default]
    Auto,
    Cold,
    Mild,
    Hot,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    #[default]
    Maintain,
    Lose,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            _ => Self::Normal,
        }
    }
}

impl LifeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Puppy => "puppy",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("puppy") => Self::Puppy,
            Some("senior") => Self::Senior,
            _ => Self::Adult,
        }
    }
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Mixed => "mixed",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("outdoor") => Self::Outdoor,
            Some("mixed") => Self::Mixed,
            _ => Self::Indoor,
        }
    }
}

impl SeasonFactor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cold => "cold",
            Self::Mild => "mild",
            Self::Hot => "hot",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("cold") => Self::Cold,
            Some("mild") => Self::Mild,
            Some("hot") => Self::Hot,
            _ => Self::Auto,
        }
    }

    /// Dec–Feb cold, Jun–Aug hot, everything else mild. Explicit settings pass through.
    pub fn resolve(self, month: u8) -> Self {
        match self {
            Self::Auto => match month {
                12 | 1 | 2 => Self::Cold,
                6..=8 => Self::Hot,
                _ => Self::Mild,
            },
            other => other,
        }
    }
}

impl GoalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maintain => "maintain",
            Self::Lose => "lose",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("lose") => Self::Lose,
            _ => Self::Maintain,
        }
    }
}

fn default_bcs() -> u8 {
    5
}

fn default_weekly_loss() -> f64 {
    0.75
}

/// Biometric and behavioural inputs for one dog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogProfile {
    pub weight_kg: f64,
    pub target_weight_kg: f64,
    #[serde(default)]
    pub neutered: bool,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default = "default_bcs")]
    pub bcs: u8,
    #[serde(default)]
    pub life_stage: LifeStage,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub season_factor: SeasonFactor,
    #[serde(default)]
    pub goal_mode: GoalMode,
    #[serde(default = "default_weekly_loss")]
    pub weekly_loss_rate_pct: f64,
    #[serde(default)]
    pub breed: Option<String>,
}

impl Default for DogProfile {
    fn default() -> Self {
        Self {
            weight_kg: 10.0,
            target_weight_kg: 10.0,
            neutered: false,
            activity_level: ActivityLevel::default(),
            bcs: default_bcs(),
            life_stage: LifeStage::default(),
            environment: Environment::default(),
            season_factor: SeasonFactor::default(),
            goal_mode: GoalMode::default(),
            weekly_loss_rate_pct: default_weekly_loss(),
            breed: None,
        }
    }
}

impl DogProfile {
    /// Copy of the profile with an `auto` season pinned to the month of `day`.
    pub fn resolved_for(&self, day: Date) -> Self {
        Self {
            season_factor: self.season_factor.resolve(month_number(day)),
            ..self.clone()
        }
    }
}
