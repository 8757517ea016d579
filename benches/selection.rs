use chronosel::{
    complete::{exclude_incomplete_groups, GroupKey, UnitGranularity},
    derive_fields,
    select::{select_indices, SelectionPredicate},
    LayerTime, TemporalField,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Ten years of daily timestamps.
fn daily_stamps() -> Vec<LayerTime> {
    let start = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    (0..3650i64)
        .map(|offset| LayerTime::Date(start + chrono::Duration::days(offset)))
        .collect()
}

fn benchmark_derivation(c: &mut Criterion) {
    let stamps = daily_stamps();

    c.bench_function("derive_fields_3650_daily", |b| {
        b.iter(|| derive_fields(black_box(&stamps), Some(6)).unwrap())
    });
}

fn benchmark_selection(c: &mut Criterion) {
    let stamps = daily_stamps();
    let table = derive_fields(&stamps, Some(6)).unwrap();

    let mut group = c.benchmark_group("selection");

    group.bench_function("exact_years", |b| {
        let predicate = SelectionPredicate::ExactSet(vec![1984.into(), 1985.into()]);
        b.iter(|| select_indices(black_box(&table), TemporalField::Year, &predicate).unwrap())
    });

    group.bench_function("between_dates", |b| {
        let predicate = SelectionPredicate::Between("1982-06-01".into(), "1987-06-01".into());
        b.iter(|| select_indices(black_box(&table), TemporalField::Date, &predicate).unwrap())
    });

    group.finish();
}

fn benchmark_completeness(c: &mut Criterion) {
    let stamps = daily_stamps();
    let table = derive_fields(&stamps, None).unwrap();

    c.bench_function("exclude_incomplete_groups_daily", |b| {
        b.iter(|| {
            exclude_incomplete_groups(
                black_box(&table),
                GroupKey::Year,
                UnitGranularity::MonthDay,
                false,
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_derivation,
    benchmark_selection,
    benchmark_completeness
);
criterion_main!(benches);
