use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EventStore, ProfileStore, SummaryStore, TipStore};
use crate::coach::repo_types::CoachTip;
use crate::energy::DogProfile;
use crate::logs::repo_types::{ActivityEvent, MealEvent, NewActivity, NewMeal};
use crate::summaries::{repo_types::DailySummary, services::summarize};

type DogKey = (Uuid, Uuid);

#[derive(Default)]
struct Inner {
    profiles: HashMap<DogKey, DogProfile>,
    meals: HashMap<DogKey, Vec<MealEvent>>,
    activities: HashMap<DogKey, Vec<ActivityEvent>>,
    summaries: HashMap<DogKey, BTreeMap<Date, DailySummary>>,
    tips: HashMap<DogKey, BTreeMap<Date, CoachTip>>,
}

/// Process-local store for development runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid, dog_id: Uuid) -> anyhow::Result<Option<DogProfile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.get(&(user_id, dog_id)).cloned())
    }

    async fn put_profile(&self, user_id: Uuid, dog_id: Uuid, profile: &DogProfile) -> anyhow::Result<()> {
        let mut inner = self.inner.write().await;
        inner.profiles.insert((user_id, dog_id), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert_meal(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        meal: &NewMeal,
        now: OffsetDateTime,
    ) -> anyhow::Result<MealEvent> {
        let event = MealEvent {
            id: Uuid::new_v4(),
            dog_id,
            kind: meal.kind.clone(),
            label: meal.label.clone(),
            grams: meal.grams,
            kcal: Some(meal.kcal),
            day: meal.day,
            created_at: now,
        };
        let mut inner = self.inner.write().await;
        inner.meals.entry((user_id, dog_id)).or_default().push(event.clone());
        Ok(event)
    }

    async fn insert_activity(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        activity: &NewActivity,
        now: OffsetDateTime,
    ) -> anyhow::Result<ActivityEvent> {
        let event = ActivityEvent {
            id: Uuid::new_v4(),
            dog_id,
            kind: activity.kind.clone(),
            label: activity.label.clone(),
            minutes: activity.minutes,
            kcal: Some(activity.kcal),
            day: activity.day,
            created_at: now,
        };
        let mut inner = self.inner.write().await;
        inner
            .activities
            .entry((user_id, dog_id))
            .or_default()
            .push(event.clone());
        Ok(event)
    }

    async fn meals_for_day(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Vec<MealEvent>> {
        let inner = self.inner.read().await;
        Ok(inner
            .meals
            .get(&(user_id, dog_id))
            .map(|all| all.iter().filter(|m| m.day == day).cloned().collect())
            .unwrap_or_default())
    }

    async fn activities_for_day(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
    ) -> anyhow::Result<Vec<ActivityEvent>> {
        let inner = self.inner.read().await;
        Ok(inner
            .activities
            .get(&(user_id, dog_id))
            .map(|all| all.iter().filter(|a| a.day == day).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl SummaryStore for MemoryStore {
    async fn get_summary(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<DailySummary>> {
        let inner = self.inner.read().await;
        Ok(inner
            .summaries
            .get(&(user_id, dog_id))
            .and_then(|days| days.get(&day))
            .cloned())
    }

    async fn upsert_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        summary: &DailySummary,
    ) -> anyhow::Result<DailySummary> {
        let mut inner = self.inner.write().await;
        let days = inner.summaries.entry((user_id, dog_id)).or_default();
        let mut stored = summary.clone();
        if let Some(existing) = days.get(&summary.day) {
            stored.created_at = existing.created_at;
        }
        days.insert(stored.day, stored.clone());
        Ok(stored)
    }

    async fn recompute_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
        target: i64,
        now: OffsetDateTime,
    ) -> anyhow::Result<DailySummary> {
        // one write guard covers the read of events and the upsert
        let mut inner = self.inner.write().await;
        let key = (user_id, dog_id);
        let meals: Vec<MealEvent> = inner
            .meals
            .get(&key)
            .map(|all| all.iter().filter(|m| m.day == day).cloned().collect())
            .unwrap_or_default();
        let activities: Vec<ActivityEvent> = inner
            .activities
            .get(&key)
            .map(|all| all.iter().filter(|a| a.day == day).cloned().collect())
            .unwrap_or_default();

        let mut stored = summarize(day, &meals, &activities, target, now);
        let days = inner.summaries.entry(key).or_default();
        if let Some(existing) = days.get(&day) {
            stored.created_at = existing.created_at;
        }
        days.insert(day, stored.clone());
        Ok(stored)
    }

    async fn list_summaries(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<DailySummary>> {
        if from > to {
            return Ok(Vec::new());
        }
        let inner = self.inner.read().await;
        Ok(inner
            .summaries
            .get(&(user_id, dog_id))
            .map(|days| days.range(from..=to).map(|(_, s)| s.clone()).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl TipStore for MemoryStore {
    async fn get_tip(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<CoachTip>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tips
            .get(&(user_id, dog_id))
            .and_then(|days| days.get(&day))
            .cloned())
    }

    async fn upsert_tip(&self, user_id: Uuid, dog_id: Uuid, tip: &CoachTip) -> anyhow::Result<CoachTip> {
        let mut inner = self.inner.write().await;
        let days = inner.tips.entry((user_id, dog_id)).or_default();
        let mut stored = tip.clone();
        if let Some(existing) = days.get(&tip.day) {
            stored.created_at = existing.created_at;
        }
        days.insert(stored.day, stored.clone());
        Ok(stored)
    }
}
