//! Truncation: unit-aligned span starts, idempotence, and field-aligned
//! custom ranges.

use chrono::{NaiveDate, NaiveDateTime};
use temponorm_core::{truncate, truncate_to_field, Field, Unit};

fn at_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at_hms(y, m, d, 0, 0, 0)
}

#[test]
fn truncates_to_each_unit_boundary() {
    let point = at_hms(1985, 6, 17, 13, 45, 58);

    assert_eq!(truncate(point, Unit::Century).unwrap(), at(1900, 1, 1));
    assert_eq!(truncate(point, Unit::Decade).unwrap(), at(1980, 1, 1));
    assert_eq!(truncate(point, Unit::Year).unwrap(), at(1985, 1, 1));
    assert_eq!(truncate(point, Unit::Month).unwrap(), at(1985, 6, 1));
    // 1985-06-17 is a Monday, so the week starts that day.
    assert_eq!(truncate(point, Unit::Week).unwrap(), at(1985, 6, 17));
    assert_eq!(truncate(point, Unit::Day).unwrap(), at(1985, 6, 17));
    assert_eq!(
        truncate(point, Unit::Hour).unwrap(),
        at_hms(1985, 6, 17, 13, 0, 0)
    );
    assert_eq!(
        truncate(point, Unit::Minute).unwrap(),
        at_hms(1985, 6, 17, 13, 45, 0)
    );
}

#[test]
fn week_truncation_crosses_month_boundaries() {
    // 2023-01-01 is a Sunday; its week starts on Monday 2022-12-26.
    assert_eq!(truncate(at(2023, 1, 1), Unit::Week).unwrap(), at(2022, 12, 26));
}

#[test]
fn truncation_is_idempotent() {
    let units = [
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Week,
        Unit::Month,
        Unit::Year,
        Unit::Decade,
        Unit::Century,
    ];
    let point = at_hms(2019, 11, 30, 23, 59, 59);
    for unit in units {
        let once = truncate(point, unit).unwrap();
        assert_eq!(truncate(once, unit).unwrap(), once, "unit {unit}");
    }
}

#[test]
fn field_aligned_truncation() {
    let point = at_hms(2020, 7, 19, 8, 30, 0);
    // First day of the month, truncated to days.
    assert_eq!(
        truncate_to_field(point, Field::DayOfMonth).unwrap(),
        at(2020, 7, 1)
    );
    // First day of the week: 2020-07-19 is a Sunday, week starts 07-13.
    assert_eq!(
        truncate_to_field(point, Field::DayOfWeek).unwrap(),
        at(2020, 7, 13)
    );
    // First month of the year.
    assert_eq!(
        truncate_to_field(point, Field::MonthOfYear).unwrap(),
        at(2020, 1, 1)
    );
    // First hour of the day.
    assert_eq!(
        truncate_to_field(point, Field::HourOfDay).unwrap(),
        at(2020, 7, 19)
    );
}

#[test]
fn negative_years_floor_toward_the_past() {
    assert_eq!(truncate(at(-25, 6, 1), Unit::Century).unwrap(), at(-100, 1, 1));
    assert_eq!(truncate(at(-25, 6, 1), Unit::Decade).unwrap(), at(-30, 1, 1));
}
