use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use super::rules::{CoachInsight, Severity};
use crate::day::serde_day;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TipMetrics {
    pub target: Option<i64>,
    pub avg7: Option<i64>,
    pub avg14: Option<i64>,
}

/// Stored coaching tip, one per dog per calendar day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoachTip {
    #[serde(with = "serde_day")]
    pub day: Date,
    pub title: String,
    pub bullets: Vec<String>,
    pub severity: Severity,
    pub metrics: TipMetrics,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl CoachTip {
    pub fn new(day: Date, insight: &CoachInsight, metrics: TipMetrics, now: OffsetDateTime) -> Self {
        Self {
            day,
            title: insight.title.clone(),
            bullets: insight.bullets.clone(),
            severity: insight.severity,
            metrics,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CoachTipRow {
    pub day: Date,
    pub title: String,
    pub bullets: Vec<String>,
    pub severity: String,
    pub target: Option<i64>,
    pub avg7: Option<i64>,
    pub avg14: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<CoachTipRow> for CoachTip {
    fn from(r: CoachTipRow) -> Self {
        Self {
            day: r.day,
            title: r.title,
            bullets: r.bullets,
            severity: Severity::parse_or_good(&r.severity),
            metrics: TipMetrics {
                target: r.target,
                avg7: r.avg7,
                avg14: r.avg14,
            },
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
