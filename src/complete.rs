//! Group-based completeness filtering.
//!
//! Two dual operations over the derived-field table, parameterized by a
//! grouping key (calendar year or austral year) and a unit granularity
//! (month or month-day):
//!
//! - [`exclude_incomplete_groups`] drops whole groups that do not contain
//!   every calendar unit present elsewhere in the dataset.
//! - [`exclude_unmatched_units`] drops calendar units not present in every
//!   group.
//!
//! Zero survivors is an expected outcome, not an error: both operations
//! return an explicit empty [`CompletenessOutcome`] and log a warning.

use crate::error::Result;
use crate::token::month::MONTH_ABBREV;
use crate::types::{DerivedRecord, DerivedTable, TemporalField};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Grouping key for completeness filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Calendar year.
    Year,
    /// Austral year; requires a table derived with a split month.
    Summer,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year => f.write_str("year"),
            GroupKey::Summer => f.write_str("summer"),
        }
    }
}

/// Calendar unit granularity for completeness filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitGranularity {
    Month,
    MonthDay,
}

impl UnitGranularity {
    /// Human-readable unit noun used in the clarity report.
    pub fn unit_word(&self) -> &'static str {
        match self {
            UnitGranularity::Month => "month",
            UnitGranularity::MonthDay => "month-day combination",
        }
    }
}

/// Calendar unit: month number plus day of month (0 at month granularity).
/// Tuple order gives calendar order for sorting.
type Unit = (u32, u32);

const LEAP_DAY: Unit = (2, 29);

/// Result of one completeness-filtering operation.
///
/// An empty index set is a legal outcome the caller must check for; it
/// means the data did not satisfy completeness anywhere, not that the call
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessOutcome {
    /// Indices of surviving layers, in input order.
    pub indices: Vec<usize>,
    /// Labels of the surviving groups or units, in calendar order.
    pub kept: Vec<String>,
    /// Labels of the excluded groups or units, in calendar order.
    pub excluded: Vec<String>,
    summary: String,
}

impl CompletenessOutcome {
    /// Whether nothing survived the filter.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The human-readable clarity report.
    pub fn clarity(&self) -> &str {
        &self.summary
    }
}

fn group_of(record: &DerivedRecord, key: GroupKey) -> Option<i32> {
    match key {
        GroupKey::Year => record.year,
        GroupKey::Summer => record.summer,
    }
}

fn unit_of(record: &DerivedRecord, granularity: UnitGranularity) -> Option<Unit> {
    let month = record.month?;
    match granularity {
        UnitGranularity::Month => Some((month, 0)),
        UnitGranularity::MonthDay => Some((month, record.day?)),
    }
}

fn unit_label(unit: Unit) -> String {
    let abbrev = MONTH_ABBREV[(unit.0 - 1) as usize];
    if unit.1 == 0 {
        abbrev.to_string()
    } else {
        format!("{}-{:02}", abbrev, unit.1)
    }
}

fn key_available(table: &DerivedTable, key: GroupKey) -> Result<()> {
    if key == GroupKey::Summer {
        table.field_available(TemporalField::Summer)?;
    }
    Ok(())
}

fn list_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "none".to_string()
    } else {
        labels.join(", ")
    }
}

/// Drop whole groups that are missing calendar units.
///
/// The reference set is the set of distinct unit values across the entire
/// dataset; a group survives only if its own unit set equals the
/// reference. At month-day granularity `Feb-29` is removed from both sides
/// before comparison, so the leap day never disqualifies a group.
///
/// # Examples
///
/// ```rust
/// use chronosel::{derive_fields_iso, complete::{exclude_incomplete_groups, GroupKey, UnitGranularity}};
///
/// // 1980 has Jan and Feb; 1981 only Jan.
/// let table = derive_fields_iso(
///     &[Some("1980-01-15"), Some("1980-02-15"), Some("1981-01-15")],
///     None,
/// )?;
/// let outcome = exclude_incomplete_groups(&table, GroupKey::Year, UnitGranularity::Month, false)?;
/// assert_eq!(outcome.indices, vec![0, 1]);
/// assert_eq!(outcome.kept, vec!["1980"]);
/// # Ok::<(), chronosel::ChronoselError>(())
/// ```
pub fn exclude_incomplete_groups(
    table: &DerivedTable,
    key: GroupKey,
    granularity: UnitGranularity,
    print_clarity: bool,
) -> Result<CompletenessOutcome> {
    key_available(table, key)?;

    let mut group_units: FxHashMap<i32, FxHashSet<Unit>> = FxHashMap::default();
    let mut reference: FxHashSet<Unit> = FxHashSet::default();
    for record in table.records() {
        if let (Some(group), Some(unit)) = (group_of(record, key), unit_of(record, granularity)) {
            group_units.entry(group).or_default().insert(unit);
            reference.insert(unit);
        }
    }

    if granularity == UnitGranularity::MonthDay {
        reference.remove(&LEAP_DAY);
        for units in group_units.values_mut() {
            units.remove(&LEAP_DAY);
        }
    }

    let surviving: FxHashSet<i32> = group_units
        .iter()
        .filter(|(_, units)| **units == reference)
        .map(|(group, _)| *group)
        .collect();

    let indices: Vec<usize> = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            group_of(record, key).is_some_and(|group| surviving.contains(&group))
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut kept: Vec<i32> = surviving.iter().copied().collect();
    kept.sort_unstable();
    let mut excluded: Vec<i32> = group_units
        .keys()
        .filter(|&group| !surviving.contains(group))
        .copied()
        .collect();
    excluded.sort_unstable();

    let kept: Vec<String> = kept.iter().map(i32::to_string).collect();
    let excluded: Vec<String> = excluded.iter().map(i32::to_string).collect();
    let summary = format!(
        "{} groups with every {} present kept: {}; incomplete {} groups excluded: {}",
        key,
        granularity.unit_word(),
        list_or_none(&kept),
        key,
        list_or_none(&excluded),
    );

    if surviving.is_empty() {
        log::warn!("no {} group contains every {}", key, granularity.unit_word());
    }
    if print_clarity {
        log::info!("{}", summary);
    }

    Ok(CompletenessOutcome {
        indices,
        kept,
        excluded,
        summary,
    })
}

/// Drop calendar units not present in every group (the dual of
/// [`exclude_incomplete_groups`]).
///
/// The reference set is the set of distinct grouping-key values across the
/// dataset; a unit survives only if it appears in every one of them.
pub fn exclude_unmatched_units(
    table: &DerivedTable,
    key: GroupKey,
    granularity: UnitGranularity,
    print_clarity: bool,
) -> Result<CompletenessOutcome> {
    key_available(table, key)?;

    let mut unit_groups: FxHashMap<Unit, FxHashSet<i32>> = FxHashMap::default();
    let mut reference_groups: FxHashSet<i32> = FxHashSet::default();
    for record in table.records() {
        if let (Some(group), Some(unit)) = (group_of(record, key), unit_of(record, granularity)) {
            unit_groups.entry(unit).or_default().insert(group);
            reference_groups.insert(group);
        }
    }

    let surviving: FxHashSet<Unit> = unit_groups
        .iter()
        .filter(|(_, groups)| **groups == reference_groups)
        .map(|(unit, _)| *unit)
        .collect();

    let indices: Vec<usize> = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            unit_of(record, granularity).is_some_and(|unit| surviving.contains(&unit))
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut kept: Vec<Unit> = surviving.iter().copied().collect();
    kept.sort_unstable();
    let mut excluded: Vec<Unit> = unit_groups
        .keys()
        .filter(|&unit| !surviving.contains(unit))
        .copied()
        .collect();
    excluded.sort_unstable();

    let kept: Vec<String> = kept.into_iter().map(unit_label).collect();
    let excluded: Vec<String> = excluded.into_iter().map(unit_label).collect();
    let summary = format!(
        "{}s present in every {} group kept: {}; unmatched {}s excluded: {}",
        granularity.unit_word(),
        key,
        list_or_none(&kept),
        granularity.unit_word(),
        list_or_none(&excluded),
    );

    if surviving.is_empty() {
        log::warn!("no {} appears in every {} group", granularity.unit_word(), key);
    }
    if print_clarity {
        log::info!("{}", summary);
    }

    Ok(CompletenessOutcome {
        indices,
        kept,
        excluded,
        summary,
    })
}
