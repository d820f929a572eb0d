use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::profile::{ActivityLevel, DogProfile, Environment, GoalMode, LifeStage, SeasonFactor};

pub const MIN_WEIGHT_KG: f64 = 0.5;

const MIN_WEEKLY_LOSS_PCT: f64 = 0.25;
const MAX_WEEKLY_LOSS_PCT: f64 = 1.25;
const MIN_DEFICIT: f64 = 0.12;
const MAX_DEFICIT: f64 = 0.26;
const MAX_DEFICIT_OVERWEIGHT: f64 = 0.28;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CalorieRange {
    pub low: i64,
    pub high: i64,
}

/// Output of [`compute_target`]. All kcal figures are multiples of 10.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalorieResult {
    pub rer: i64,
    pub maintenance: i64,
    pub mer: i64,
    pub recommended: i64,
    pub range: CalorieRange,
    pub deficit_pct: f64,
    pub notes: Vec<String>,
}

pub fn round10(kcal: f64) -> i64 {
    ((kcal / 10.0).round() * 10.0) as i64
}

fn clamp(n: f64, lo: f64, hi: f64) -> f64 {
    n.max(lo).min(hi)
}

fn clamp_weight(weight_kg: f64) -> f64 {
    if weight_kg.is_finite() {
        weight_kg.max(MIN_WEIGHT_KG)
    } else {
        MIN_WEIGHT_KG
    }
}

/// Resting energy requirement, `70 * kg^0.75`.
pub fn resting_energy(weight_kg: f64) -> f64 {
    70.0 * clamp_weight(weight_kg).powf(0.75)
}

fn neuter_factor(neutered: bool) -> f64 {
    if neutered {
        1.6
    } else {
        1.8
    }
}

fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Low => 0.9,
        ActivityLevel::Normal => 1.0,
        ActivityLevel::High => 1.15,
    }
}

fn life_stage_factor(stage: LifeStage) -> f64 {
    match stage {
        LifeStage::Puppy => 2.0,
        LifeStage::Adult => 1.0,
        LifeStage::Senior => 0.95,
    }
}

fn season_factor(season: SeasonFactor, env: Environment) -> f64 {
    // an unresolved Auto behaves like mild
    let base = match season {
        SeasonFactor::Cold => 1.05,
        SeasonFactor::Hot => 0.95,
        SeasonFactor::Mild | SeasonFactor::Auto => 1.0,
    };
    let exposure = match env {
        Environment::Outdoor => 1.03,
        Environment::Mixed => 1.015,
        Environment::Indoor => 1.0,
    };
    base * exposure
}

fn body_condition_factor(bcs: u8) -> f64 {
    match bcs {
        7.. => 0.85,
        6 => 0.92,
        0..=3 => 1.08,
        _ => 1.0,
    }
}

/// Deficit fraction for a weekly loss rate (percent of body weight).
pub fn deficit_for(weekly_loss_rate_pct: f64, bcs: u8) -> f64 {
    let weekly = weekly_rate(weekly_loss_rate_pct);
    let mut deficit = clamp(
        MIN_DEFICIT + (weekly - MIN_WEEKLY_LOSS_PCT) * 0.14,
        MIN_DEFICIT,
        MAX_DEFICIT,
    );
    if bcs >= 8 {
        deficit = clamp(deficit + 0.02, MIN_DEFICIT, MAX_DEFICIT_OVERWEIGHT);
    }
    deficit
}

fn weekly_rate(raw: f64) -> f64 {
    let raw = if raw.is_finite() { raw } else { 0.75 };
    clamp(raw, MIN_WEEKLY_LOSS_PCT, MAX_WEEKLY_LOSS_PCT)
}

fn normalize_breed(raw: &str) -> Option<String> {
    lazy_static! {
        static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    }
    let cleaned = SPACES.replace_all(raw.trim(), " ");
    (!cleaned.is_empty()).then(|| cleaned.into_owned())
}

fn format_rate(rate: f64) -> String {
    let s = format!("{:.2}", rate);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Daily calorie target for a dog. Total over any input: weight is floored,
/// BCS clamped to 1..=9, and a non-finite loss rate falls back to 0.75 %/week.
pub fn compute_target(profile: &DogProfile) -> CalorieResult {
    let bcs = profile.bcs.clamp(1, 9);
    let rer = resting_energy(profile.weight_kg);

    let maintenance = rer
        * neuter_factor(profile.neutered)
        * activity_factor(profile.activity_level)
        * life_stage_factor(profile.life_stage)
        * season_factor(profile.season_factor, profile.environment)
        * body_condition_factor(bcs);

    let mut notes = vec![format!("Estimated RER: {} kcal", round10(rer))];

    let deficit_pct = match profile.goal_mode {
        GoalMode::Lose => {
            let weekly = weekly_rate(profile.weekly_loss_rate_pct);
            let deficit = deficit_for(weekly, bcs);
            notes.push(format!(
                "Weight-loss mode: ~{}% calorie deficit",
                (deficit * 100.0).round() as i64
            ));
            notes.push(format!(
                "Target loss: ~{}% of body weight per week (estimate)",
                format_rate(weekly)
            ));
            deficit
        }
        GoalMode::Maintain => {
            notes.push("Maintenance mode".to_string());
            0.0
        }
    };

    let recommended = round10(maintenance * (1.0 - deficit_pct));
    let range = CalorieRange {
        low: round10(recommended as f64 * 0.92),
        high: round10(recommended as f64 * 1.08),
    };

    if let Some(breed) = profile.breed.as_deref().and_then(normalize_breed) {
        notes.push(format!(
            "Breed: {breed} (used for tips, not for the formula)"
        ));
    }

    CalorieResult {
        rer: round10(rer),
        maintenance: round10(maintenance),
        mer: recommended,
        recommended,
        range,
        deficit_pct,
        notes,
    }
}
