use chrono::{NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, Criterion};
use temponorm_core::{
    Field, FieldRepeating, Intersection, RepeatingInterval, Unit, UnitRepeating,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn benchmark_unit_day_following(c: &mut Criterion) {
    let days = UnitRepeating::new(Unit::Day);
    let point = at(2020, 1, 1);

    c.bench_function("unit_day_following_1000", |b| {
        b.iter(|| {
            let count = days.following(point).unwrap().take(1000).count();
            assert_eq!(count, 1000);
        })
    });
}

fn benchmark_day_31_skip_path(c: &mut Criterion) {
    // Roughly 7 of every 12 cycles produce an occurrence; the rest exercise
    // the invalid-cycle skip.
    let day31 = FieldRepeating::new(Field::DayOfMonth, 31).unwrap();
    let point = at(2020, 1, 1);

    c.bench_function("day_31_following_100", |b| {
        b.iter(|| {
            let count = day31.following(point).unwrap().take(100).count();
            assert_eq!(count, 100);
        })
    });
}

fn benchmark_intersection_scan(c: &mut Criterion) {
    // Wednesdays in April: each year-wide window scans two member streams.
    let wednesdays_in_april = Intersection::new(vec![
        RepeatingInterval::Field(FieldRepeating::new(Field::DayOfWeek, 3).unwrap()),
        RepeatingInterval::Field(FieldRepeating::new(Field::MonthOfYear, 4).unwrap()),
    ])
    .unwrap();
    let point = at(2020, 1, 1);

    c.bench_function("intersection_wednesdays_in_april_40", |b| {
        b.iter(|| {
            let count = wednesdays_in_april
                .following(point)
                .unwrap()
                .take(40)
                .count();
            assert_eq!(count, 40);
        })
    });
}

criterion_group!(
    benches,
    benchmark_unit_day_following,
    benchmark_day_31_skip_path,
    benchmark_intersection_scan
);
criterion_main!(benches);
