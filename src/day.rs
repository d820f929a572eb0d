use anyhow::Context;
use time::{macros::format_description, Date, Duration, OffsetDateTime, UtcOffset};

// Calendar day as YYYY-MM-DD on the wire.
time::serde::format_description!(pub serde_day, Date, "[year]-[month]-[day]");

pub fn parse_day(raw: &str) -> anyhow::Result<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("invalid day {raw:?}, expected YYYY-MM-DD"))
}

/// The calendar day `now` falls on at the given offset.
pub fn today_at(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}

pub fn month_number(day: Date) -> u8 {
    u8::from(day.month())
}

/// Inclusive window of `days` calendar days ending on `end`.
pub fn window_start(end: Date, days: u16) -> Date {
    let back = i64::from(days.saturating_sub(1));
    end.saturating_sub(Duration::days(back))
}
