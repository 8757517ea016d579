//! Temporal field derivation.
//!
//! Turns a sequence of per-layer timestamps into a [`DerivedTable`] with
//! one record per layer, preserving order and length. Derivation is a pure
//! function of its inputs and is re-run on every call.

use crate::error::{ChronoselError, Result};
use crate::types::{DerivedRecord, DerivedTable, LayerTime};

/// Derive calendar fields from per-layer timestamps.
///
/// Missing timestamps produce all-missing records; a dataset with zero
/// known timestamps yields an all-missing table, not an error. The
/// austral `summer` field is computed only when `split_month` is given:
/// `summer = year + 1` when `month > split_month`, else `year`.
///
/// # Examples
///
/// ```rust
/// use chronosel::{derive_fields, LayerTime};
///
/// let stamps = vec![
///     LayerTime::from_iso("1991-12-01")?,
///     LayerTime::from_iso("1992-01-15")?,
///     LayerTime::from_iso("1991-06-01")?,
/// ];
/// let table = derive_fields(&stamps, Some(3))?;
/// let summers: Vec<_> = table.records().iter().map(|r| r.summer.unwrap()).collect();
/// assert_eq!(summers, [1992, 1992, 1991]);
/// # Ok::<(), chronosel::ChronoselError>(())
/// ```
pub fn derive_fields(timestamps: &[LayerTime], split_month: Option<u32>) -> Result<DerivedTable> {
    if let Some(split) = split_month {
        if !(1..=12).contains(&split) {
            return Err(ChronoselError::InvalidSplitMonth(split));
        }
    }
    let has_time = timestamps.iter().any(LayerTime::has_time);
    let records = timestamps
        .iter()
        .map(|time| DerivedRecord::from_time(time, split_month))
        .collect();
    Ok(DerivedTable::new(records, has_time, split_month))
}

/// Convenience wrapper: parse ISO timestamp strings (with `None` for
/// missing layers) and derive in one step.
pub fn derive_fields_iso<S: AsRef<str>>(
    timestamps: &[Option<S>],
    split_month: Option<u32>,
) -> Result<DerivedTable> {
    let parsed: Vec<LayerTime> = timestamps
        .iter()
        .map(|stamp| match stamp {
            Some(s) => LayerTime::from_iso(s.as_ref()),
            None => Ok(LayerTime::Missing),
        })
        .collect::<Result<_>>()?;
    derive_fields(&parsed, split_month)
}
