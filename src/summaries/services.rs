use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use super::repo_types::DailySummary;
use crate::logs::repo_types::{ActivityEvent, MealEvent};
use crate::store::SummaryStore;

/// Reduces one day's events to a summary. Each sum is rounded once and
/// `net` is taken from the rounded sums, so `net == calories_in - calories_out`.
pub fn summarize(
    day: Date,
    meals: &[MealEvent],
    activities: &[ActivityEvent],
    target: i64,
    now: OffsetDateTime,
) -> DailySummary {
    let calories_in = meals.iter().map(MealEvent::energy).sum::<f64>().round() as i64;
    let calories_out = activities.iter().map(ActivityEvent::energy).sum::<f64>().round() as i64;
    let net = calories_in - calories_out;

    DailySummary {
        day,
        calories_in,
        calories_out,
        net,
        target,
        delta: net - target,
        created_at: now,
        updated_at: now,
    }
}

/// Re-scans every event of `day` and overwrites that day's summary.
///
/// Safe to call any number of times; callers run it after each new log entry
/// instead of patching sums. The store aggregates and writes in one step, so
/// concurrent log requests cannot leave an older sum behind.
pub async fn recompute_daily_summary<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    day: Date,
    target: i64,
    now: OffsetDateTime,
) -> anyhow::Result<DailySummary>
where
    S: SummaryStore + ?Sized,
{
    let stored = store.recompute_summary(user_id, dog_id, day, target, now).await?;
    debug!(
        %dog_id,
        %day,
        calories_in = stored.calories_in,
        calories_out = stored.calories_out,
        net = stored.net,
        delta = stored.delta,
        "daily summary computed"
    );
    info!(%user_id, %dog_id, %day, "daily summary stored");
    Ok(stored)
}

/// Returns today's summary, creating it through the recompute path when missing.
pub async fn ensure_today_summary<S>(
    store: &S,
    user_id: Uuid,
    dog_id: Uuid,
    today: Date,
    target: i64,
    now: OffsetDateTime,
) -> anyhow::Result<DailySummary>
where
    S: SummaryStore + ?Sized,
{
    if let Some(existing) = store.get_summary(user_id, dog_id, today).await? {
        return Ok(existing);
    }
    recompute_daily_summary(store, user_id, dog_id, today, target, now).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::repo_types::{NewActivity, NewMeal};
    use crate::store::{EventStore, MemoryStore};
    use time::macros::{date, datetime};

    const DAY: Date = date!(2025 - 02 - 10);

    fn meal(kcal: f64, day: Date) -> NewMeal {
        NewMeal {
            kind: "kibble_standard".into(),
            label: "Kibble (standard)".into(),
            grams: kcal / 3.6,
            kcal,
            day,
        }
    }

    fn walk(kcal: f64, day: Date) -> NewActivity {
        NewActivity {
            kind: "walk_normal".into(),
            label: "Walk (normal)".into(),
            minutes: 30.0,
            kcal,
            day,
        }
    }

    #[tokio::test]
    async fn empty_day_is_all_zero() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let s = recompute_daily_summary(&store, user, dog, DAY, 630, datetime!(2025-02-10 09:00 UTC))
            .await
            .unwrap();
        assert_eq!((s.calories_in, s.calories_out, s.net), (0, 0, 0));
        assert_eq!(s.delta, -630);
        assert_eq!(s.target, 630);
    }

    #[tokio::test]
    async fn sums_only_the_requested_day() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-02-10 09:00 UTC);
        store.insert_meal(user, dog, &meal(360.0, DAY), at).await.unwrap();
        store.insert_meal(user, dog, &meal(210.0, DAY), at).await.unwrap();
        store.insert_meal(user, dog, &meal(999.0, date!(2025 - 02 - 09)), at).await.unwrap();
        store.insert_activity(user, dog, &walk(100.4, DAY), at).await.unwrap();
        store.insert_meal(Uuid::new_v4(), dog, &meal(500.0, DAY), at).await.unwrap();

        let s = recompute_daily_summary(&store, user, dog, DAY, 630, at).await.unwrap();
        assert_eq!(s.calories_in, 570);
        assert_eq!(s.calories_out, 100);
        assert_eq!(s.net, 470);
        assert_eq!(s.delta, 470 - 630);
    }

    #[test]
    fn missing_or_bad_kcal_counts_as_zero() {
        let at = datetime!(2025-02-10 09:00 UTC);
        let event = |kcal| MealEvent {
            id: Uuid::new_v4(),
            dog_id: Uuid::new_v4(),
            kind: "custom".into(),
            label: "custom".into(),
            grams: 10.0,
            kcal,
            day: DAY,
            created_at: at,
        };
        let meals = [event(None), event(Some(f64::NAN)), event(Some(-40.0)), event(Some(120.0))];
        let s = summarize(DAY, &meals, &[], 100, at);
        assert_eq!(s.calories_in, 120);
        assert_eq!(s.net, 120);
        assert_eq!(s.delta, 20);
    }

    #[tokio::test]
    async fn net_matches_rounded_sums() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-02-10 09:00 UTC);
        store.insert_meal(user, dog, &meal(100.4, DAY), at).await.unwrap();
        store.insert_activity(user, dog, &walk(20.6, DAY), at).await.unwrap();

        let s = recompute_daily_summary(&store, user, dog, DAY, 100, at).await.unwrap();
        assert_eq!((s.calories_in, s.calories_out), (100, 21));
        assert_eq!(s.net, s.calories_in - s.calories_out);
        assert_eq!(s.net, 79);
        assert_eq!(s.delta, -21);
    }

    #[tokio::test]
    async fn concurrent_recomputes_settle_on_all_events() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-02-10 09:00 UTC);
        store.insert_meal(user, dog, &meal(300.0, DAY), at).await.unwrap();
        store.insert_meal(user, dog, &meal(200.0, DAY), at).await.unwrap();

        let (a, b) = tokio::join!(
            recompute_daily_summary(&store, user, dog, DAY, 600, at),
            recompute_daily_summary(&store, user, dog, DAY, 600, at),
        );
        assert_eq!(a.unwrap().calories_in, 500);
        assert_eq!(b.unwrap().calories_in, 500);
        let stored = store.get_summary(user, dog, DAY).await.unwrap().unwrap();
        assert_eq!(stored.calories_in, 500);
    }

    #[tokio::test]
    async fn recompute_is_idempotent() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let first_at = datetime!(2025-02-10 09:00 UTC);
        store.insert_meal(user, dog, &meal(400.0, DAY), first_at).await.unwrap();
        store.insert_activity(user, dog, &walk(55.0, DAY), first_at).await.unwrap();

        let first = recompute_daily_summary(&store, user, dog, DAY, 630, first_at).await.unwrap();
        let second = recompute_daily_summary(&store, user, dog, DAY, 630, datetime!(2025-02-10 10:00 UTC))
            .await
            .unwrap();

        assert_eq!(
            DailySummary {
                updated_at: first.updated_at,
                ..second.clone()
            },
            first
        );
        assert_eq!(second.created_at, first_at);
        assert_eq!(second.updated_at, datetime!(2025-02-10 10:00 UTC));
        assert_eq!(
            store.list_summaries(user, dog, DAY, DAY).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn recompute_picks_up_new_events() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-02-10 09:00 UTC);
        store.insert_meal(user, dog, &meal(300.0, DAY), at).await.unwrap();
        recompute_daily_summary(&store, user, dog, DAY, 600, at).await.unwrap();

        store.insert_meal(user, dog, &meal(200.0, DAY), at).await.unwrap();
        let s = recompute_daily_summary(&store, user, dog, DAY, 600, at).await.unwrap();
        assert_eq!(s.calories_in, 500);
        assert_eq!(s.delta, -100);
    }

    #[tokio::test]
    async fn ensure_creates_once_then_returns_existing() {
        let store = MemoryStore::new();
        let (user, dog) = (Uuid::new_v4(), Uuid::new_v4());
        let at = datetime!(2025-02-10 07:00 UTC);

        let created = ensure_today_summary(&store, user, dog, DAY, 630, at).await.unwrap();
        assert_eq!(created.delta, -630);

        store.insert_meal(user, dog, &meal(100.0, DAY), at).await.unwrap();
        let again = ensure_today_summary(&store, user, dog, DAY, 700, datetime!(2025-02-10 08:00 UTC))
            .await
            .unwrap();
        assert_eq!(again, created);
    }
}
