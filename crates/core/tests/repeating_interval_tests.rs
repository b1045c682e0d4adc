//! Base repeating-interval generators: fixed-unit stepping and field-value
//! matching, in both directions.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use temponorm_core::{Field, FieldRepeating, Span, Unit, UnitRepeating};

fn at_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    at_hms(y, m, d, 0, 0, 0)
}

fn span(start: NaiveDateTime, end: NaiveDateTime) -> Span {
    Span::new(start, end)
}

#[test]
fn unit_following_starts_at_the_containing_boundary() {
    let days = UnitRepeating::new(Unit::Day);

    // Aligned point: the first span starts exactly there.
    let mut aligned = days.following(at(2020, 5, 10)).unwrap();
    assert_eq!(aligned.next().unwrap(), span(at(2020, 5, 10), at(2020, 5, 11)));

    // Unaligned point: the first span contains it.
    let unaligned_point = at_hms(2020, 5, 10, 15, 30, 0);
    let mut unaligned = days.following(unaligned_point).unwrap();
    let first = unaligned.next().unwrap();
    assert_eq!(first, span(at(2020, 5, 10), at(2020, 5, 11)));
    assert!(first.start <= unaligned_point && unaligned_point < first.end);
}

#[test]
fn unit_following_steps_are_contiguous() {
    let months = UnitRepeating::new(Unit::Month);
    let spans: Vec<Span> = months.following(at(2020, 1, 1)).unwrap().take(4).collect();
    assert_eq!(spans[0], span(at(2020, 1, 1), at(2020, 2, 1)));
    assert_eq!(spans[3], span(at(2020, 4, 1), at(2020, 5, 1)));
    for pair in spans.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn unit_preceding_descends_from_the_boundary_after_the_point() {
    let days = UnitRepeating::new(Unit::Day);

    let mut aligned = days.preceding(at(2020, 5, 10)).unwrap();
    assert_eq!(aligned.next().unwrap(), span(at(2020, 5, 9), at(2020, 5, 10)));

    // Unaligned: the first span still contains the point.
    let mut unaligned = days.preceding(at_hms(2020, 5, 10, 8, 0, 0)).unwrap();
    assert_eq!(
        unaligned.next().unwrap(),
        span(at(2020, 5, 10), at(2020, 5, 11))
    );
    assert_eq!(
        unaligned.next().unwrap(),
        span(at(2020, 5, 9), at(2020, 5, 10))
    );
}

#[test]
fn day_31_generator_skips_short_months() {
    let day31 = FieldRepeating::new(Field::DayOfMonth, 31).unwrap();
    let spans: Vec<Span> = day31.following(at(2021, 1, 1)).unwrap().take(8).collect();

    let months: Vec<u32> = spans.iter().map(|s| s.start.month()).collect();
    assert_eq!(months, vec![1, 3, 5, 7, 8, 10, 12, 1]);
    for s in &spans {
        assert_eq!(s.start.day(), 31);
        assert!(![2, 4, 6, 9, 11].contains(&s.start.month()));
    }
    assert_eq!(spans[7].start, at(2022, 1, 31));
}

#[test]
fn day_31_generator_skips_short_months_backward() {
    let day31 = FieldRepeating::new(Field::DayOfMonth, 31).unwrap();
    let spans: Vec<Span> = day31.preceding(at(2021, 5, 15)).unwrap().take(3).collect();
    // April has no 31st: March comes right after January.
    assert_eq!(spans[0].start, at(2021, 3, 31));
    assert_eq!(spans[1].start, at(2021, 1, 31));
    assert_eq!(spans[2].start, at(2020, 12, 31));
}

#[test]
fn month_generator_recurs_yearly() {
    let april = FieldRepeating::new(Field::MonthOfYear, 4).unwrap();
    let spans: Vec<Span> = april.following(at(2023, 1, 1)).unwrap().take(3).collect();
    assert_eq!(spans[0], span(at(2023, 4, 1), at(2023, 5, 1)));
    assert_eq!(spans[1], span(at(2024, 4, 1), at(2024, 5, 1)));
    assert_eq!(spans[2], span(at(2025, 4, 1), at(2025, 5, 1)));

    let mut backward = april.preceding(at(2023, 6, 15)).unwrap();
    assert_eq!(
        backward.next().unwrap(),
        span(at(2023, 4, 1), at(2023, 5, 1))
    );
    assert_eq!(
        backward.next().unwrap(),
        span(at(2022, 4, 1), at(2022, 5, 1))
    );
}

#[test]
fn weekday_generator_never_emits_a_span_ending_before_the_point() {
    // 2023-01-01 is a Sunday. The Wednesday of that week (Dec 28) is
    // already over, so the first following Wednesday is Jan 4.
    let wednesdays = FieldRepeating::new(Field::DayOfWeek, 3).unwrap();
    let mut forward = wednesdays.following(at(2023, 1, 1)).unwrap();
    assert_eq!(forward.next().unwrap(), span(at(2023, 1, 4), at(2023, 1, 5)));

    let mut backward = wednesdays.preceding(at(2023, 1, 1)).unwrap();
    assert_eq!(
        backward.next().unwrap(),
        span(at(2022, 12, 28), at(2022, 12, 29))
    );
}

#[test]
fn field_generator_rejects_values_outside_the_domain() {
    assert!(FieldRepeating::new(Field::DayOfMonth, 32).is_err());
    assert!(FieldRepeating::new(Field::MonthOfYear, 0).is_err());
    assert!(FieldRepeating::new(Field::DayOfWeek, 8).is_err());
}

#[test]
fn generator_base_and_range() {
    let day31 = FieldRepeating::new(Field::DayOfMonth, 31).unwrap();
    assert_eq!(day31.base(), Unit::Day);
    assert_eq!(day31.range(), Unit::Month);

    let weeks = UnitRepeating::new(Unit::Week);
    assert_eq!(weeks.base(), Unit::Week);
    assert_eq!(weeks.range(), Unit::Week);
}
