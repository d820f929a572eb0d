use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::{EventStore, ProfileStore, SummaryStore, TipStore};
use crate::coach::repo_types::{CoachTip, CoachTipRow};
use crate::dogs::repo_types::DogRow;
use crate::energy::DogProfile;
use crate::logs::repo_types::{ActivityEvent, MealEvent, NewActivity, NewMeal};
use crate::summaries::repo_types::DailySummary;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_profile(&self, user_id: Uuid, dog_id: Uuid) -> anyhow::Result<Option<DogProfile>> {
        let row = sqlx::query_as::<_, DogRow>(
            r#"
            SELECT weight_kg, target_weight_kg, neutered, activity_level, bcs, life_stage,
                   environment, season_factor, goal_mode, weekly_loss_rate_pct, breed
              FROM dogs
             WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .fetch_optional(&self.db)
        .await
        .context("get dog profile")?;

        Ok(row.map(DogProfile::from))
    }

    async fn put_profile(&self, user_id: Uuid, dog_id: Uuid, profile: &DogProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO dogs (user_id, id, weight_kg, target_weight_kg, neutered, activity_level,
                              bcs, life_stage, environment, season_factor, goal_mode,
                              weekly_loss_rate_pct, breed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id, id) DO UPDATE
               SET weight_kg = EXCLUDED.weight_kg,
                   target_weight_kg = EXCLUDED.target_weight_kg,
                   neutered = EXCLUDED.neutered,
                   activity_level = EXCLUDED.activity_level,
                   bcs = EXCLUDED.bcs,
                   life_stage = EXCLUDED.life_stage,
                   environment = EXCLUDED.environment,
                   season_factor = EXCLUDED.season_factor,
                   goal_mode = EXCLUDED.goal_mode,
                   weekly_loss_rate_pct = EXCLUDED.weekly_loss_rate_pct,
                   breed = EXCLUDED.breed,
                   updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(profile.weight_kg)
        .bind(profile.target_weight_kg)
        .bind(profile.neutered)
        .bind(profile.activity_level.as_str())
        .bind(i32::from(profile.bcs))
        .bind(profile.life_stage.as_str())
        .bind(profile.environment.as_str())
        .bind(profile.season_factor.as_str())
        .bind(profile.goal_mode.as_str())
        .bind(profile.weekly_loss_rate_pct)
        .bind(profile.breed.as_deref())
        .execute(&self.db)
        .await
        .context("upsert dog profile")?;

        Ok(())
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn insert_meal(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        meal: &NewMeal,
        now: OffsetDateTime,
    ) -> anyhow::Result<MealEvent> {
        let event = sqlx::query_as::<_, MealEvent>(
            r#"
            INSERT INTO food_logs (id, user_id, dog_id, kind, label, grams, kcal, day, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, dog_id, kind, label, grams, kcal, day, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(dog_id)
        .bind(&meal.kind)
        .bind(&meal.label)
        .bind(meal.grams)
        .bind(meal.kcal)
        .bind(meal.day)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .context("insert food log")?;

        Ok(event)
    }

    async fn insert_activity(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        activity: &NewActivity,
        now: OffsetDateTime,
    ) -> anyhow::Result<ActivityEvent> {
        let event = sqlx::query_as::<_, ActivityEvent>(
            r#"
            INSERT INTO activity_logs (id, user_id, dog_id, kind, label, minutes, kcal, day, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, dog_id, kind, label, minutes, kcal, day, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(dog_id)
        .bind(&activity.kind)
        .bind(&activity.label)
        .bind(activity.minutes)
        .bind(activity.kcal)
        .bind(activity.day)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .context("insert activity log")?;

        Ok(event)
    }

    async fn meals_for_day(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Vec<MealEvent>> {
        let rows = sqlx::query_as::<_, MealEvent>(
            r#"
            SELECT id, dog_id, kind, label, grams, kcal, day, created_at
              FROM food_logs
             WHERE user_id = $1 AND dog_id = $2 AND day = $3
             ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(day)
        .fetch_all(&self.db)
        .await
        .context("list food logs for day")?;

        Ok(rows)
    }

    async fn activities_for_day(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
    ) -> anyhow::Result<Vec<ActivityEvent>> {
        let rows = sqlx::query_as::<_, ActivityEvent>(
            r#"
            SELECT id, dog_id, kind, label, minutes, kcal, day, created_at
              FROM activity_logs
             WHERE user_id = $1 AND dog_id = $2 AND day = $3
             ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(day)
        .fetch_all(&self.db)
        .await
        .context("list activity logs for day")?;

        Ok(rows)
    }
}

#[async_trait]
impl SummaryStore for PgStore {
    async fn get_summary(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<DailySummary>> {
        let row = sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT day, calories_in, calories_out, net, target, delta, created_at, updated_at
              FROM daily_summaries
             WHERE user_id = $1 AND dog_id = $2 AND day = $3
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(day)
        .fetch_optional(&self.db)
        .await
        .context("get daily summary")?;

        Ok(row)
    }

    async fn upsert_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        summary: &DailySummary,
    ) -> anyhow::Result<DailySummary> {
        // created_at is only written on insert
        let row = sqlx::query_as::<_, DailySummary>(
            r#"
            INSERT INTO daily_summaries (user_id, dog_id, day, calories_in, calories_out, net,
                                         target, delta, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, dog_id, day) DO UPDATE
               SET calories_in = EXCLUDED.calories_in,
                   calories_out = EXCLUDED.calories_out,
                   net = EXCLUDED.net,
                   target = EXCLUDED.target,
                   delta = EXCLUDED.delta,
                   updated_at = EXCLUDED.updated_at
            RETURNING day, calories_in, calories_out, net, target, delta, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(summary.day)
        .bind(summary.calories_in)
        .bind(summary.calories_out)
        .bind(summary.net)
        .bind(summary.target)
        .bind(summary.delta)
        .bind(summary.created_at)
        .bind(summary.updated_at)
        .fetch_one(&self.db)
        .await
        .context("upsert daily summary")?;

        Ok(row)
    }

    async fn recompute_summary(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        day: Date,
        target: i64,
        now: OffsetDateTime,
    ) -> anyhow::Result<DailySummary> {
        // NaN sorts above 'Infinity' in Postgres, so the upper bound drops both
        let row = sqlx::query_as::<_, DailySummary>(
            r#"
            WITH sums AS (
                SELECT
                    COALESCE((
                        SELECT ROUND(SUM(kcal)::numeric)::BIGINT
                          FROM food_logs
                         WHERE user_id = $1 AND dog_id = $2 AND day = $3
                           AND kcal > 0 AND kcal < 'Infinity'::float8
                    ), 0) AS calories_in,
                    COALESCE((
                        SELECT ROUND(SUM(kcal)::numeric)::BIGINT
                          FROM activity_logs
                         WHERE user_id = $1 AND dog_id = $2 AND day = $3
                           AND kcal > 0 AND kcal < 'Infinity'::float8
                    ), 0) AS calories_out
            )
            INSERT INTO daily_summaries (user_id, dog_id, day, calories_in, calories_out, net,
                                         target, delta, created_at, updated_at)
            SELECT $1, $2, $3, calories_in, calories_out, calories_in - calories_out,
                   $4, calories_in - calories_out - $4, $5, $5
              FROM sums
            ON CONFLICT (user_id, dog_id, day) DO UPDATE
               SET calories_in = EXCLUDED.calories_in,
                   calories_out = EXCLUDED.calories_out,
                   net = EXCLUDED.net,
                   target = EXCLUDED.target,
                   delta = EXCLUDED.delta,
                   updated_at = EXCLUDED.updated_at
            RETURNING day, calories_in, calories_out, net, target, delta, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(day)
        .bind(target)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .context("recompute daily summary")?;

        Ok(row)
    }

    async fn list_summaries(
        &self,
        user_id: Uuid,
        dog_id: Uuid,
        from: Date,
        to: Date,
    ) -> anyhow::Result<Vec<DailySummary>> {
        let rows = sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT day, calories_in, calories_out, net, target, delta, created_at, updated_at
              FROM daily_summaries
             WHERE user_id = $1 AND dog_id = $2 AND day BETWEEN $3 AND $4
             ORDER BY day ASC
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .context("list daily summaries")?;

        Ok(rows)
    }
}

#[async_trait]
impl TipStore for PgStore {
    async fn get_tip(&self, user_id: Uuid, dog_id: Uuid, day: Date) -> anyhow::Result<Option<CoachTip>> {
        let row = sqlx::query_as::<_, CoachTipRow>(
            r#"
            SELECT day, title, bullets, severity, target, avg7, avg14, created_at, updated_at
              FROM coach_tips
             WHERE user_id = $1 AND dog_id = $2 AND day = $3
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(day)
        .fetch_optional(&self.db)
        .await
        .context("get coach tip")?;

        Ok(row.map(CoachTip::from))
    }

    async fn upsert_tip(&self, user_id: Uuid, dog_id: Uuid, tip: &CoachTip) -> anyhow::Result<CoachTip> {
        let row = sqlx::query_as::<_, CoachTipRow>(
            r#"
            INSERT INTO coach_tips (user_id, dog_id, day, title, bullets, severity,
                                    target, avg7, avg14, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id, dog_id, day) DO UPDATE
               SET title = EXCLUDED.title,
                   bullets = EXCLUDED.bullets,
                   severity = EXCLUDED.severity,
                   target = EXCLUDED.target,
                   avg7 = EXCLUDED.avg7,
                   avg14 = EXCLUDED.avg14,
                   updated_at = EXCLUDED.updated_at
            RETURNING day, title, bullets, severity, target, avg7, avg14, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(dog_id)
        .bind(tip.day)
        .bind(&tip.title)
        .bind(&tip.bullets)
        .bind(tip.severity.as_str())
        .bind(tip.metrics.target)
        .bind(tip.metrics.avg7)
        .bind(tip.metrics.avg14)
        .bind(tip.created_at)
        .bind(tip.updated_at)
        .fetch_one(&self.db)
        .await
        .context("upsert coach tip")?;

        Ok(row.into())
    }
}
