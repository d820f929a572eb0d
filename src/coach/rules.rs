use serde::{Deserialize, Serialize};

/// Days over target by more than this (kcal) count toward the "above" streak.
pub const ABOVE_MARGIN: i64 = 150;
/// Days under target by more than this (kcal) count toward the "below" streak.
pub const BELOW_MARGIN: i64 = 250;
pub const MIN_STREAK: usize = 3;
const STABLE_BAND: i64 = 120;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warn,
    Bad,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Warn => "warn",
            Severity::Bad => "bad",
        }
    }

    pub fn parse_or_good(raw: &str) -> Self {
        match raw {
            "warn" => Severity::Warn,
            "bad" => Severity::Bad,
            _ => Severity::Good,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoachInsight {
    pub title: String,
    pub severity: Severity,
    pub bullets: Vec<String>,
}

/// Mean of the series, 0 when empty.
pub fn average(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Consecutive qualifying entries counted back from the most recent one.
pub fn trailing_streak(values: &[i64], qualifies: impl Fn(i64) -> bool) -> usize {
    values.iter().rev().take_while(|&&v| qualifies(v)).count()
}

/// Shown before any day has logged meals or activities.
pub fn no_history_insight() -> CoachInsight {
    CoachInsight {
        title: "Not enough data yet".into(),
        severity: Severity::Good,
        bullets: vec![
            "Log meals and walks for a few days to see how intake compares with the target.".into(),
            "Weighing food for the first week makes the trend much more reliable.".into(),
        ],
    }
}

/// Classifies recent daily net energy against the target.
///
/// `last7` and `last14` are ordered oldest first. Rules are checked in a fixed
/// order and the first hit wins: a trailing streak above target, a trailing
/// streak far below target, the 7-day average above, the 7-day average far
/// below, and otherwise good adherence.
pub fn build_coach_insight(target: i64, last7: &[i64], last14: &[i64]) -> CoachInsight {
    let gap7 = (average(last7) - target as f64).round() as i64;
    let gap14 = (average(last14) - target as f64).round() as i64;

    let streak_above = trailing_streak(last14, |net| net - target > ABOVE_MARGIN);
    let streak_below = trailing_streak(last14, |net| net - target < -BELOW_MARGIN);

    if streak_above >= MIN_STREAK {
        return CoachInsight {
            title: "Above target for a few days".into(),
            severity: Severity::Warn,
            bullets: vec![
                format!(
                    "{streak_above} days in a row above target (about +{ABOVE_MARGIN} kcal or more)."
                ),
                "Cut snacks and extras by 5–10% and weigh treats for the next 3 days.".into(),
                "Goal: get back into the range without drastic cuts.".into(),
            ],
        };
    }

    if streak_below >= MIN_STREAK {
        return CoachInsight {
            title: "Deficit too aggressive".into(),
            severity: Severity::Bad,
            bullets: vec![
                format!(
                    "{streak_below} days in a row well below target (about -{BELOW_MARGIN} kcal or more)."
                ),
                "Risk: hunger, poorer adherence and a metabolism that adapts.".into(),
                "Increase portions slightly (5–10%) and aim for consistency.".into(),
            ],
        };
    }

    if gap7 > ABOVE_MARGIN {
        return CoachInsight {
            title: "Trending above target".into(),
            severity: Severity::Warn,
            bullets: vec![
                format!("7-day average is ~{gap7} kcal above target."),
                "Trim snacks or portions by 5–10%; a small correction is enough.".into(),
                "Tip: snacks are usually the number one cause.".into(),
            ],
        };
    }

    if gap7 < -BELOW_MARGIN {
        return CoachInsight {
            title: "Trending below target".into(),
            severity: Severity::Bad,
            bullets: vec![
                format!("7-day average is ~{} kcal below target.", gap7.abs()),
                "A moderate deficit works better: increase portions slightly.".into(),
                "If the dog is already restless or hungry, avoid further cuts.".into(),
            ],
        };
    }

    let long_run = if gap14.abs() <= STABLE_BAND {
        "Stable over 14 days as well: great consistency.".to_string()
    } else {
        format!("Over 14 days you are ~{gap14:+} kcal from target: ok, but watch regularity.")
    };

    CoachInsight {
        title: "Good adherence".into(),
        severity: Severity::Good,
        bullets: vec![
            "7-day average is in line with the target: keep it up.".into(),
            long_run,
            "Tip: keep meal times and portions steady for 7–10 days before changing strategy."
                .into(),
        ],
    }
}
