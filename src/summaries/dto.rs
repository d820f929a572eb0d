use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::DailySummary;
use crate::day::serde_day;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryListResponse {
    #[serde(with = "serde_day")]
    pub from: Date,
    #[serde(with = "serde_day")]
    pub to: Date,
    pub summaries: Vec<DailySummary>,
}
