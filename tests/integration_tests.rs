use chronosel::prelude::*;
use chronosel::complete::{exclude_incomplete_groups, exclude_unmatched_units};
use chronosel::select::select_indices;
use chronosel::token::date::normalize_date;
use chronosel::token::month::normalize_month;
use chronosel::token::month_day::normalize_month_day;
use chronosel::NameCase;

fn table_from(dates: &[&str], split_month: Option<u32>) -> DerivedTable {
    let stamps: Vec<Option<&str>> = dates.iter().copied().map(Some).collect();
    derive_fields_iso(&stamps, split_month).unwrap()
}

#[test]
fn test_austral_summer_derivation() {
    let table = table_from(&["1991-12-01", "1992-01-15", "1991-06-01"], Some(3));
    let summers: Vec<_> = table.records().iter().map(|r| r.summer.unwrap()).collect();
    assert_eq!(summers, [1992, 1992, 1991]);
}

#[test]
fn test_month_day_normalization() {
    assert_eq!(
        normalize_month_day("7 Feb", MonthDayForm::MON_DD, "-").unwrap(),
        "Feb-07"
    );
    assert!(matches!(
        normalize_month_day("01-02", MonthDayForm::MON_DD, "-"),
        Err(ChronoselError::AmbiguousDate(_))
    ));
}

#[test]
fn test_exact_year_selection() {
    let table = table_from(
        &["1990-05-01", "1991-05-01", "1992-05-01", "1993-05-01"],
        None,
    );
    let predicate = SelectionPredicate::ExactSet(vec![1991.into(), 1992.into()]);
    let indices = select_indices(&table, TemporalField::Year, &predicate).unwrap();
    assert_eq!(indices, vec![1, 2]);
}

#[test]
fn test_completeness_reference_scenario() {
    // 1980 and 1981 carry Jan-Apr; 1982 stops at Mar, 1983 at Feb.
    let mut dates = Vec::new();
    for (year, last_month) in [(1980, 4), (1981, 4), (1982, 3), (1983, 2)] {
        for month in 1..=last_month {
            dates.push(format!("{:04}-{:02}-15", year, month));
        }
    }
    let stamps: Vec<Option<&str>> = dates.iter().map(|d| Some(d.as_str())).collect();
    let table = derive_fields_iso(&stamps, None).unwrap();

    let groups =
        exclude_incomplete_groups(&table, GroupKey::Year, UnitGranularity::Month, false).unwrap();
    assert_eq!(groups.kept, vec!["1980", "1981"]);

    let units =
        exclude_unmatched_units(&table, GroupKey::Year, UnitGranularity::Month, false).unwrap();
    assert_eq!(units.kept, vec!["Jan", "Feb"]);
}

#[test]
fn test_leap_day_token_is_valid() {
    // The leap-day exemption lives in completeness filtering only; the
    // token layer accepts Feb 29 of any year.
    assert_eq!(
        normalize_date("29-02-2019", DateForm::ISO, "-").unwrap(),
        "2019-02-29"
    );
}

#[test]
fn test_month_token_round_trip() {
    for month in 1..=12u32 {
        let name = normalize_month(&month.to_string(), MonthForm::Full(NameCase::Title));
        let back = normalize_month(&name, MonthForm::Unpadded);
        assert_eq!(back, month.to_string());
    }
}

#[test]
fn test_select_through_table_facade() {
    let table = table_from(&["1990-05-01", "1995-05-01", "2000-05-01"], None);
    let config = Config::default();

    let indices = table
        .select(TemporalField::Year, SelectionArgs::new().between(1992, 2000), &config)
        .unwrap();
    assert_eq!(indices, vec![1, 2]);

    // Zero predicates with the warn policy keeps every layer.
    let config = config.with_empty_selection(EmptySelectionPolicy::WarnKeepAll);
    let indices = table
        .select(TemporalField::Year, SelectionArgs::new(), &config)
        .unwrap();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_completeness_through_table_facade() {
    let table = table_from(
        &["1980-01-15", "1980-02-15", "1981-01-15", "1981-02-15", "1982-01-15"],
        None,
    );
    let config = Config::default();

    let outcome = table.exclude_incomplete_groups(GroupKey::Year, &config).unwrap();
    assert_eq!(outcome.kept, vec!["1980", "1981"]);
    assert_eq!(outcome.indices, vec![0, 1, 2, 3]);

    let outcome = table.exclude_unmatched_units(GroupKey::Year, &config).unwrap();
    assert_eq!(outcome.kept, vec!["Jan"]);
    assert_eq!(outcome.indices, vec![0, 2, 4]);
}

#[test]
fn test_daily_completeness_with_summer_grouping() {
    // Two austral summers spanning the new year, one missing a day.
    let table = table_from(
        &[
            "1980-12-30",
            "1980-12-31",
            "1981-01-01",
            "1981-12-30",
            "1981-12-31",
        ],
        Some(6),
    );
    let config = Config::default().with_split_month(6).with_daily(true);

    let outcome = table.exclude_incomplete_groups(GroupKey::Summer, &config).unwrap();
    // Summer 1982 is missing Jan-01.
    assert_eq!(outcome.kept, vec!["1981"]);
    assert_eq!(outcome.indices, vec![0, 1, 2]);
}

#[test]
fn test_predicate_chain_on_recomputed_tables() {
    // Callers applying two predicates in sequence re-run the deriver on
    // the surviving timestamps.
    let dates = ["1990-03-01", "1991-07-01", "1992-02-01", "1993-08-01"];
    let table = table_from(&dates, None);

    let first = select_indices(
        &table,
        TemporalField::Year,
        &SelectionPredicate::After(1990.into()),
    )
    .unwrap();
    assert_eq!(first, vec![1, 2, 3]);

    let survivors: Vec<&str> = first.iter().map(|&i| dates[i]).collect();
    let table2 = table_from(&survivors, None);
    let second = select_indices(
        &table2,
        TemporalField::Month,
        &SelectionPredicate::Before(8.into()),
    )
    .unwrap();
    assert_eq!(second, vec![0, 1]);
    // Indices are relative to the second table, i.e. 1991-07-01 and 1992-02-01.
}
