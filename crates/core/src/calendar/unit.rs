// Calendar units and calendar-aware arithmetic over chrono points.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A calendar granularity.
///
/// Ordering is by approximate duration (finest to coarsest), which is what
/// sum-period application order and combinator member ordering rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    Decade,
    Century,
}

impl Unit {
    /// Approximate duration of one unit, used only for ordering units
    /// against each other. Month and year use the mean Gregorian lengths.
    pub fn duration_estimate(self) -> TimeDelta {
        let seconds = match self {
            Unit::Second => 1,
            Unit::Minute => 60,
            Unit::Hour => 3_600,
            Unit::Day => 86_400,
            Unit::Week => 604_800,
            Unit::Month => 2_629_746,
            Unit::Year => 31_556_952,
            Unit::Decade => 315_569_520,
            Unit::Century => 3_155_695_200,
        };
        TimeDelta::seconds(seconds)
    }

    /// Add a signed number of this unit to a point.
    ///
    /// Month-based units clamp the day-of-month to the target month's length,
    /// so Jan 31 + 1 month lands on the last day of February.
    pub fn add(self, point: NaiveDateTime, amount: i64) -> Result<NaiveDateTime> {
        let delta = match self {
            Unit::Second => TimeDelta::try_seconds(amount),
            Unit::Minute => TimeDelta::try_minutes(amount),
            Unit::Hour => TimeDelta::try_hours(amount),
            Unit::Day => TimeDelta::try_days(amount),
            Unit::Week => TimeDelta::try_weeks(amount),
            Unit::Month => return shift_months(point, amount),
            Unit::Year => return shift_months(point, months_of(amount, 12)?),
            Unit::Decade => return shift_months(point, months_of(amount, 120)?),
            Unit::Century => return shift_months(point, months_of(amount, 1200)?),
        }
        .ok_or_else(|| CoreError::out_of_range(format!("{amount} {self} as a duration")))?;
        point
            .checked_add_signed(delta)
            .ok_or_else(|| CoreError::out_of_range(format!("{point} + {amount} {self}")))
    }
}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Unit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration_estimate().cmp(&other.duration_estimate())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
            Unit::Decade => "decade",
            Unit::Century => "century",
        };
        f.write_str(name)
    }
}

fn months_of(amount: i64, per_unit: i64) -> Result<i64> {
    amount
        .checked_mul(per_unit)
        .ok_or_else(|| CoreError::out_of_range(format!("{amount} x {per_unit} months")))
}

fn shift_months(point: NaiveDateTime, months: i64) -> Result<NaiveDateTime> {
    let total = i64::from(point.year()) * 12 + i64::from(point.month0()) + months;
    let year = i32::try_from(total.div_euclid(12))
        .map_err(|_| CoreError::out_of_range(format!("{point} + {months} months")))?;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = point.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(point.time()))
        .ok_or_else(|| CoreError::out_of_range(format!("{point} + {months} months")))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}
