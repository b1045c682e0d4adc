//! Union and Intersection combinators over repeating intervals.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use temponorm_core::{
    Field, FieldRepeating, Intersection, RepeatingInterval, Span, TimeExpression, Union, Unit,
    UnitRepeating,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn span(start: NaiveDateTime, end: NaiveDateTime) -> Span {
    Span::new(start, end)
}

fn days_and_weeks() -> Union {
    Union::new(vec![
        RepeatingInterval::Unit(UnitRepeating::new(Unit::Day)),
        RepeatingInterval::Unit(UnitRepeating::new(Unit::Week)),
    ])
    .unwrap()
}

fn wednesdays_in_april() -> Intersection {
    Intersection::new(vec![
        RepeatingInterval::Field(FieldRepeating::new(Field::DayOfWeek, 3).unwrap()),
        RepeatingInterval::Field(FieldRepeating::new(Field::MonthOfYear, 4).unwrap()),
    ])
    .unwrap()
}

#[test]
fn union_base_is_smallest_and_range_is_largest() {
    let union = days_and_weeks();
    assert_eq!(union.base(), Unit::Day);
    assert_eq!(union.range(), Unit::Week);
}

#[test]
fn union_preceding_prefers_the_longer_span_on_shared_ends() {
    // 2023-01-02 is a Monday, so the day span [01-01, 01-02) and the week
    // span [2022-12-26, 01-02) share an end; the longer week comes first.
    let union = days_and_weeks();
    let spans: Vec<Span> = union.preceding(at(2023, 1, 2)).unwrap().take(3).collect();
    assert_eq!(spans[0], span(at(2022, 12, 26), at(2023, 1, 2)));
    assert_eq!(spans[1], span(at(2023, 1, 1), at(2023, 1, 2)));
    assert_eq!(spans[2], span(at(2022, 12, 31), at(2023, 1, 1)));
}

#[test]
fn union_following_prefers_the_longer_span_on_shared_starts() {
    let union = days_and_weeks();
    let spans: Vec<Span> = union.following(at(2023, 1, 2)).unwrap().take(3).collect();
    assert_eq!(spans[0], span(at(2023, 1, 2), at(2023, 1, 9)));
    assert_eq!(spans[1], span(at(2023, 1, 2), at(2023, 1, 3)));
    assert_eq!(spans[2], span(at(2023, 1, 3), at(2023, 1, 4)));
}

#[test]
fn union_merges_field_members_in_order() {
    // Days 10 and 20 of the month interleave month by month.
    let union = Union::new(vec![
        RepeatingInterval::Field(FieldRepeating::new(Field::DayOfMonth, 20).unwrap()),
        RepeatingInterval::Field(FieldRepeating::new(Field::DayOfMonth, 10).unwrap()),
    ])
    .unwrap();
    let starts: Vec<NaiveDateTime> = union
        .following(at(2021, 3, 15))
        .unwrap()
        .take(4)
        .map(|s| s.start)
        .collect();
    assert_eq!(
        starts,
        vec![at(2021, 3, 20), at(2021, 4, 10), at(2021, 4, 20), at(2021, 5, 10)]
    );
}

#[test]
fn intersection_following_yields_only_wednesdays_in_april() {
    let spans: Vec<Span> = wednesdays_in_april()
        .following(at(2023, 1, 1))
        .unwrap()
        .take(6)
        .collect();

    let starts: Vec<NaiveDateTime> = spans.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            at(2023, 4, 5),
            at(2023, 4, 12),
            at(2023, 4, 19),
            at(2023, 4, 26),
            at(2024, 4, 3),
            at(2024, 4, 10),
        ]
    );
    for s in &spans {
        assert_eq!(s.start.weekday(), Weekday::Wed);
        assert_eq!(s.start.month(), 4);
    }
}

#[test]
fn intersection_preceding_descends_through_aprils() {
    let starts: Vec<NaiveDateTime> = wednesdays_in_april()
        .preceding(at(2023, 6, 15))
        .unwrap()
        .take(5)
        .map(|s| s.start)
        .collect();
    assert_eq!(
        starts,
        vec![
            at(2023, 4, 26),
            at(2023, 4, 19),
            at(2023, 4, 12),
            at(2023, 4, 5),
            at(2022, 4, 27),
        ]
    );
}

#[test]
fn intersection_base_and_range_follow_the_members() {
    let intersection = wednesdays_in_april();
    assert_eq!(intersection.base(), Unit::Day);
    assert_eq!(intersection.range(), Unit::Year);
}

#[test]
fn combinators_need_at_least_two_members() {
    let lone = vec![RepeatingInterval::Unit(UnitRepeating::new(Unit::Day))];
    assert!(Union::new(lone.clone()).is_err());
    assert!(Intersection::new(lone).is_err());
}

#[test]
fn combinators_are_defined_when_members_are() {
    let repeating = RepeatingInterval::Union(days_and_weeks());
    assert!(repeating.is_defined());
    let nested = RepeatingInterval::Intersection(
        Intersection::new(vec![
            repeating.clone(),
            RepeatingInterval::Field(FieldRepeating::new(Field::MonthOfYear, 1).unwrap()),
        ])
        .unwrap(),
    );
    assert!(nested.is_defined());
}
