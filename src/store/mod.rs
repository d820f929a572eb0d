//! Document-store boundary. Everything is keyed by user -> dog -> day.
//!
//! Upserts replace the whole record in one statement and never move
//! `created_at`, so any write can simply be repeated after a failure.

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::coach::repo_types::CoachTip;
use crate::energy::DogProfile;
use crate::logs::repo_types::{ActivityEvent, MealEvent, NewActivity, NewMeal};
use crate::summaries::repo_types::DailySummary;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid, dog_id: Uuid) -> anyhow::Result<Option<DogProfile>>;
    async fn put_profile(&self, user_id: Uuid, dog_id: Uuid, profile: &DogProfile) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_meal(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        meal: &NewMeal,
        now: OffsetDateTime,
    ) -> anyhow::Result<MealEvent>;

    async fn insert_activity(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        activity: &NewActivity,
        now: OffsetDateTime,
    ) -> anyhow::Result<ActivityEvent>;

    async fn meals_for_day(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Vec<MealEvent>>;

    async fn activities_for_day(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
    ) -> anyhow::Result<Vec<ActivityEvent>>;
}

#[async_trait]
pub trait SummaryStore: Send + Sync {
    async fn get_summary(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<DailySummary>>;

    /// Insert or overwrite the summary for `summary.day`. An existing
    /// `created_at` wins over the one passed in. Returns the stored record.
    async fn upsert_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        summary: &DailySummary,
    ) -> anyhow::Result<DailySummary>;

    /// Sums the day's meal and activity events and upserts the summary in a
    /// single step, with the same `created_at` rule as [`Self::upsert_summary`].
    async fn recompute_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
        target: i64,
        now: OffsetDateTime,
    ) -> anyhow::Result<DailySummary>;

    /// Summaries with `from <= day <= to`, oldest first.
    async fn list_summaries(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<DailySummary>>;
}

#[async_trait]
pub trait TipStore: Send + Sync {
    async fn get_tip(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<CoachTip>>;

    /// Same contract as [`SummaryStore::upsert_summary`].
    async fn upsert_tip(&self, user_id: Uuid, dog_id: Uuid, tip: &CoachTip) -> anyhow::Result<CoachTip>;
}

pub trait Store: ProfileStore + EventStore + SummaryStore + TipStore {}

impl<T> Store for T where T: ProfileStore + EventStore + SummaryStore + TipStore {}
