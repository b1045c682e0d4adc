// Calendar fields: read and (fallibly) assign a single component of a point.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::Unit;
use crate::error::{CoreError, Result};

/// A calendar field, the anchor of a field-value repeating interval.
///
/// `base()` is the granularity of one occurrence of the field, `range()` the
/// granularity over which the field recurs: day-of-month has base `Day` and
/// range `Month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SecondOfMinute,
    MinuteOfHour,
    HourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    MonthOfYear,
}

impl Field {
    pub fn base(self) -> Unit {
        match self {
            Field::SecondOfMinute => Unit::Second,
            Field::MinuteOfHour => Unit::Minute,
            Field::HourOfDay => Unit::Hour,
            Field::DayOfWeek | Field::DayOfMonth | Field::DayOfYear => Unit::Day,
            Field::MonthOfYear => Unit::Month,
        }
    }

    pub fn range(self) -> Unit {
        match self {
            Field::SecondOfMinute => Unit::Minute,
            Field::MinuteOfHour => Unit::Hour,
            Field::HourOfDay => Unit::Day,
            Field::DayOfWeek => Unit::Week,
            Field::DayOfMonth => Unit::Month,
            Field::DayOfYear | Field::MonthOfYear => Unit::Year,
        }
    }

    /// Static domain of the field, independent of any particular date.
    /// Date-dependent impossibilities (Feb 30, ordinal 366 in a common year)
    /// are only detectable by `set`.
    pub fn value_domain(self) -> RangeInclusive<i64> {
        match self {
            Field::SecondOfMinute | Field::MinuteOfHour => 0..=59,
            Field::HourOfDay => 0..=23,
            Field::DayOfWeek => 1..=7,
            Field::DayOfMonth => 1..=31,
            Field::DayOfYear => 1..=366,
            Field::MonthOfYear => 1..=12,
        }
    }

    /// The first value of the field, used by field-aligned truncation.
    pub fn first_value(self) -> i64 {
        *self.value_domain().start()
    }

    /// Read the field from a point. Day-of-week is 1 (Monday) through 7.
    pub fn get(self, point: NaiveDateTime) -> i64 {
        match self {
            Field::SecondOfMinute => i64::from(point.second()),
            Field::MinuteOfHour => i64::from(point.minute()),
            Field::HourOfDay => i64::from(point.hour()),
            Field::DayOfWeek => i64::from(point.weekday().number_from_monday()),
            Field::DayOfMonth => i64::from(point.day()),
            Field::DayOfYear => i64::from(point.ordinal()),
            Field::MonthOfYear => i64::from(point.month()),
        }
    }

    /// Produce a new point with this field set to `value`, leaving every
    /// other field untouched. Calendar-invalid combinations are errors.
    pub fn set(self, point: NaiveDateTime, value: i64) -> Result<NaiveDateTime> {
        let invalid = || CoreError::InvalidFieldValue {
            field: self,
            value,
            point,
        };
        if !self.value_domain().contains(&value) {
            return Err(invalid());
        }
        let value_u32 = u32::try_from(value).map_err(|_| invalid())?;
        match self {
            Field::SecondOfMinute => point.with_second(value_u32).ok_or_else(invalid),
            Field::MinuteOfHour => point.with_minute(value_u32).ok_or_else(invalid),
            Field::HourOfDay => point.with_hour(value_u32).ok_or_else(invalid),
            Field::DayOfWeek => {
                let offset = value - i64::from(point.weekday().number_from_monday());
                point
                    .checked_add_signed(TimeDelta::days(offset))
                    .ok_or_else(invalid)
            }
            Field::DayOfMonth => point.with_day(value_u32).ok_or_else(invalid),
            Field::DayOfYear => point.with_ordinal(value_u32).ok_or_else(invalid),
            Field::MonthOfYear => point.with_month(value_u32).ok_or_else(invalid),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::SecondOfMinute => "second-of-minute",
            Field::MinuteOfHour => "minute-of-hour",
            Field::HourOfDay => "hour-of-day",
            Field::DayOfWeek => "day-of-week",
            Field::DayOfMonth => "day-of-month",
            Field::DayOfYear => "day-of-year",
            Field::MonthOfYear => "month-of-year",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn set_day_of_month_rejects_impossible_dates() {
        let feb = at(2021, 2, 1);
        assert!(matches!(
            Field::DayOfMonth.set(feb, 30),
            Err(CoreError::InvalidFieldValue { .. })
        ));
        assert_eq!(Field::DayOfMonth.set(feb, 28).unwrap(), at(2021, 2, 28));
    }

    #[test]
    fn set_month_rejects_day_overflow() {
        // Jan 31 cannot become Apr 31.
        assert!(Field::MonthOfYear.set(at(2021, 1, 31), 4).is_err());
    }

    #[test]
    fn set_day_of_week_stays_in_the_same_week() {
        // 2023-01-01 is a Sunday; Monday of that week is 2022-12-26.
        let sunday = at(2023, 1, 1);
        assert_eq!(Field::DayOfWeek.set(sunday, 1).unwrap(), at(2022, 12, 26));
        assert_eq!(Field::DayOfWeek.get(sunday), 7);
    }

    #[test]
    fn set_rejects_values_outside_the_static_domain() {
        assert!(Field::MonthOfYear.set(at(2021, 1, 1), 13).is_err());
        assert!(Field::DayOfWeek.set(at(2021, 1, 1), 0).is_err());
    }
}
