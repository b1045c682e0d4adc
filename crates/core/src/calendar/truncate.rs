// Truncation: round a point down to the start of a unit-aligned span.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::calendar::{Field, Unit};
use crate::error::{CoreError, Result};

/// Round `point` down to the start of the `unit`-aligned span containing it.
///
/// Weeks start on Monday. Truncation is idempotent: truncating an already
/// truncated point to the same unit returns it unchanged.
pub fn truncate(point: NaiveDateTime, unit: Unit) -> Result<NaiveDateTime> {
    match unit {
        Unit::Century => year_start(floor_year(point.year(), 100)),
        Unit::Decade => year_start(floor_year(point.year(), 10)),
        Unit::Year => year_start(point.year()),
        Unit::Month => date_start(point.year(), point.month(), 1),
        Unit::Week => {
            let days_past_monday = i64::from(point.weekday().num_days_from_monday());
            let monday = point
                .date()
                .checked_sub_signed(TimeDelta::days(days_past_monday))
                .ok_or_else(|| CoreError::out_of_range(format!("week start before {point}")))?;
            Ok(monday.and_time(NaiveTime::MIN))
        }
        Unit::Day => Ok(point.date().and_time(NaiveTime::MIN)),
        Unit::Hour => at_time(point, point.hour(), 0, 0),
        Unit::Minute => at_time(point, point.hour(), point.minute(), 0),
        Unit::Second => {
            at_time(point, point.hour(), point.minute(), point.second())
        }
    }
}

/// Truncation for a custom field-defined range: set the field to its first
/// value, then truncate to the field's base unit. For day-of-month this is
/// the start of the month; for day-of-week the start of the week.
pub fn truncate_to_field(point: NaiveDateTime, field: Field) -> Result<NaiveDateTime> {
    let anchored = field.set(point, field.first_value())?;
    truncate(anchored, field.base())
}

fn floor_year(year: i32, span: i32) -> i32 {
    year.div_euclid(span) * span
}

fn year_start(year: i32) -> Result<NaiveDateTime> {
    date_start(year, 1, 1)
}

fn date_start(year: i32, month: u32, day: u32) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| CoreError::out_of_range(format!("{year:04}-{month:02}-{day:02}")))
}

fn at_time(point: NaiveDateTime, hour: u32, minute: u32, second: u32) -> Result<NaiveDateTime> {
    NaiveTime::from_hms_opt(hour, minute, second)
        .map(|time| point.date().and_time(time))
        .ok_or_else(|| CoreError::out_of_range(format!("{hour:02}:{minute:02}:{second:02}")))
}
