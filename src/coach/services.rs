use anyhow::Context;
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use super::repo_types::{CoachTip, TipMetrics};
use super::rules::{average, build_coach_insight, no_history_insight, CoachInsight};
use crate::day::window_start;
use crate::store::{EventStore, SummaryStore, TipStore};
use crate::summaries::services::ensure_today_summary;

/// Writes today's tip. Repeating the call on the same day overwrites the
/// content and keeps the first `created_at`.
pub async fn upsert_today_coach_tip<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    today: Date,
    insight: &CoachInsight,
    metrics: TipMetrics,
    now: OffsetDateTime,
) -> anyhow::Result<Date>
where
    S: TipStore + ?Sized,
{
    let tip = CoachTip::new(today, insight, metrics, now);
    let stored = store.upsert_tip(user_id, dog_id, &tip).await?;
    info!(%dog_id, day = %stored.day, severity = stored.severity.as_str(), "coach tip stored");
    Ok(stored.day)
}

fn rounded_average(values: &[i64]) -> Option<i64> {
    (!values.is_empty()).then(|| average(values).round() as i64)
}

/// Full evaluation for one dog: make sure today has a summary, read the
/// trailing 14 calendar days, classify, store and return today's tip.
///
/// Only days that have a summary take part; gaps are not treated as zero.
/// Today joins the windows once something has been logged for it.
pub async fn evaluate_coach<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    today: Date,
    target: i64,
    now: OffsetDateTime,
) -> anyhow::Result<CoachTip>
where
    S: EventStore + SummaryStore + TipStore + ?Sized,
{
    ensure_today_summary(store, user_id, dog_id, today, target, now).await?;

    let mut history = store
        .list_summaries(user_id, dog_id, window_start(today, 14), today)
        .await?;
    history.retain(|s| s.day != today || s.calories_in > 0 || s.calories_out > 0);
    let week_start = window_start(today, 7);

    let last14: Vec<i64> = history.iter().map(|s| s.net).collect();
    let last7: Vec<i64> = history
        .iter()
        .filter(|s| s.day >= week_start)
        .map(|s| s.net)
        .collect();

    let metrics = TipMetrics {
        target: Some(target),
        avg7: rounded_average(&last7),
        avg14: rounded_average(&last14),
    };
    let insight = if history.is_empty() {
        no_history_insight()
    } else {
        build_coach_insight(target, &last7, &last14)
    };
    debug!(
        %dog_id,
        days7 = last7.len(),
        days14 = last14.len(),
        title = %insight.title,
        "coach insight built"
    );

    let day = upsert_today_coach_tip(store, user_id, dog_id, today, &insight, metrics, now).await?;
    store
        .get_tip(user_id, dog_id, day)
        .await?
        .context("coach tip missing right after upsert")
}

pub async fn get_today_tip<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    today: Date,
) -> anyhow::Result<Option<CoachTip>>
where
    S: TipStore + ?Sized,
{
    store.get_tip(user_id, dog_id, today).await
}
