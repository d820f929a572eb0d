use thiserror::Error;
use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use super::dto::{LogActivityRequest, LogMealRequest};
use super::presets::{activity_preset, food_preset};
use super::repo_types::{ActivityEvent, MealEvent, NewActivity, NewMeal};
use crate::store::{EventStore, SummaryStore};
use crate::summaries::{repo_types::DailySummary, services::recompute_daily_summary};

const CUSTOM_KIND: &str = "custom";

#[derive(Debug, Error, PartialEq)]
pub enum LogInputError {
    #[error("unknown food preset: {0}")]
    UnknownFood(String),
    #[error("unknown activity preset: {0}")]
    UnknownActivity(String),
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("either a preset or {0} is required")]
    MissingRate(&'static str),
}

fn positive(value: f64, field: &'static str) -> Result<f64, LogInputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LogInputError::NotPositive(field))
    }
}

pub fn meal_kcal(grams: f64, kcal_per_100g: f64) -> f64 {
    (grams * kcal_per_100g / 100.0).round()
}

pub fn activity_kcal(weight_kg: f64, kcal_per_kg_per_hour: f64, minutes: f64) -> f64 {
    (weight_kg * kcal_per_kg_per_hour * minutes / 60.0).round()
}

fn custom_label(label: Option<&str>, fallback: &str) -> String {
    label
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn resolve_meal(req: &LogMealRequest, today: Date) -> Result<NewMeal, LogInputError> {
    let grams = positive(req.grams, "grams")?;
    let (kind, label, density) = match req.preset.as_deref() {
        Some(id) => {
            let p = food_preset(id).ok_or_else(|| LogInputError::UnknownFood(id.to_string()))?;
            (p.id.to_string(), p.label.to_string(), p.kcal_per_100g)
        }
        None => {
            let density = req
                .kcal_per_100g
                .ok_or(LogInputError::MissingRate("kcal_per_100g"))?;
            (
                CUSTOM_KIND.to_string(),
                custom_label(req.label.as_deref(), "Custom food"),
                positive(density, "kcal_per_100g")?,
            )
        }
    };

    Ok(NewMeal {
        kind,
        label,
        grams,
        kcal: meal_kcal(grams, density),
        day: req.day.unwrap_or(today),
    })
}

pub fn resolve_activity(
    req: &LogActivityRequest,
    weight_kg: f64,
    today: Date,
) -> Result<NewActivity, LogInputError> {
    let minutes = positive(req.minutes, "minutes")?;
    let (kind, label, rate) = match req.preset.as_deref() {
        Some(id) => {
            let p = activity_preset(id).ok_or_else(|| LogInputError::UnknownActivity(id.to_string()))?;
            (p.id.to_string(), p.label.to_string(), p.kcal_per_kg_per_hour)
        }
        None => {
            let rate = req
                .kcal_per_kg_per_hour
                .ok_or(LogInputError::MissingRate("kcal_per_kg_per_hour"))?;
            (
                CUSTOM_KIND.to_string(),
                custom_label(req.label.as_deref(), "Custom activity"),
                positive(rate, "kcal_per_kg_per_hour")?,
            )
        }
    };

    Ok(NewActivity {
        kind,
        label,
        minutes,
        kcal: activity_kcal(weight_kg.max(0.0), rate, minutes),
        day: req.day.unwrap_or(today),
    })
}

/// Stores the meal, then rebuilds the summary of the day it landed on.
pub async fn record_meal<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    meal: &NewMeal,
    target: i64,
    now: OffsetDateTime,
) -> anyhow::Result<(MealEvent, DailySummary)>
where
    S: EventStore + SummaryStore + ?Sized,
{
    let event = store.insert_meal(user_id, dog_id, meal, now).await?;
    info!(%dog_id, meal_id = %event.id, kcal = meal.kcal, day = %meal.day, "meal logged");
    let summary = recompute_daily_summary(store, user_id, dog_id, meal.day, target, now).await?;
    Ok((event, summary))
}

pub async fn record_activity<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    activity: &NewActivity,
    target: i64,
    now: OffsetDateTime,
) -> anyhow::Result<(ActivityEvent, DailySummary)>
where
    S: EventStore + SummaryStore + ?Sized,
{
    let event = store.insert_activity(user_id, dog_id, activity, now).await?;
    info!(%dog_id, activity_id = %event.id, kcal = activity.kcal, day = %activity.day, "activity logged");
    let summary = recompute_daily_summary(store, user_id, dog_id, activity.day, target, now).await?;
    Ok((event, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use time::macros::{date, datetime};

    const TODAY: Date = date!(2025 - 06 - 01);

    fn meal_req(preset: Option<&str>, density: Option<f64>, grams: f64) -> LogMealRequest {
        LogMealRequest {
            preset: preset.map(String::from),
            label: None,
            kcal_per_100g: density,
            grams,
            day: None,
        }
    }

    #[test]
    fn meal_from_preset() {
        let meal = resolve_meal(&meal_req(Some("kibble_standard"), None, 150.0), TODAY).unwrap();
        assert_eq!(meal.kind, "kibble_standard");
        assert_eq!(meal.kcal, 540.0);
        assert_eq!(meal.day, TODAY);
    }

    #[test]
    fn custom_meal_needs_density() {
        assert_eq!(
            resolve_meal(&meal_req(None, None, 100.0), TODAY).unwrap_err(),
            LogInputError::MissingRate("kcal_per_100g")
        );
        let meal = resolve_meal(&meal_req(None, Some(95.0), 33.0), TODAY).unwrap();
        assert_eq!(meal.kind, "custom");
        assert_eq!(meal.label, "Custom food");
        assert_eq!(meal.kcal, 31.0);
    }

    #[test]
    fn rejects_bad_quantities_and_presets() {
        assert_eq!(
            resolve_meal(&meal_req(Some("kibble_standard"), None, 0.0), TODAY).unwrap_err(),
            LogInputError::NotPositive("grams")
        );
        assert_eq!(
            resolve_meal(&meal_req(Some("kibble_standard"), None, f64::NAN), TODAY).unwrap_err(),
            LogInputError::NotPositive("grams")
        );
        assert_eq!(
            resolve_meal(&meal_req(Some("pizza"), None, 10.0), TODAY).unwrap_err(),
            LogInputError::UnknownFood("pizza".into())
        );
    }

    #[test]
    fn activity_uses_dog_weight() {
        let req = LogActivityRequest {
            preset: Some("walk_normal".into()),
            label: None,
            kcal_per_kg_per_hour: None,
            minutes: 45.0,
            day: Some(date!(2025 - 05 - 31)),
        };
        let act = resolve_activity(&req, 12.0, TODAY).unwrap();
        assert_eq!(act.kcal, 18.0);
        assert_eq!(act.day, date!(2025 - 05 - 31));
        assert_eq!(act.label, "Walk (normal)");
    }

    #[tokio::test]
    async fn recording_refreshes_summary() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-06-01 12:00 UTC);

        let meal = resolve_meal(&meal_req(Some("treats"), None, 50.0), TODAY).unwrap();
        let (_, summary) = record_meal(&store, user, dog, &meal, 600, at).await.unwrap();
        assert_eq!(summary.calories_in, 210);
        assert_eq!(summary.delta, 210 - 600);

        let req = LogActivityRequest {
            preset: Some("run_easy".into()),
            label: None,
            kcal_per_kg_per_hour: None,
            minutes: 60.0,
            day: None,
        };
        let act = resolve_activity(&req, 10.0, TODAY).unwrap();
        let (event, summary) = record_activity(&store, user, dog, &act, 600, at).await.unwrap();
        assert_eq!(event.kcal, Some(42.0));
        assert_eq!(summary.calories_out, 42);
        assert_eq!(summary.net, 168);
    }
}
