//! Predicate selection over the derived-field table.
//!
//! A selection call supplies exactly one of five mutually exclusive
//! predicate kinds. The count is enforced in one place
//! ([`SelectionArgs::resolve`]); more than one supplied predicate is
//! `AmbiguousSelection`, zero is governed by the configured
//! [`EmptySelectionPolicy`].

use crate::config::EmptySelectionPolicy;
use crate::error::{ChronoselError, Result};
use crate::token::date::{normalize_date, DateForm};
use crate::token::month_day::{normalize_month_day, MonthDayForm};
use crate::types::{DerivedTable, FieldValue, TemporalField};
use smallvec::SmallVec;

/// One of the five mutually exclusive selection predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPredicate {
    /// Field value is a member of the given set.
    ExactSet(Vec<FieldValue>),
    /// Field value is strictly less than the threshold.
    Before(FieldValue),
    /// Field value is strictly greater than the threshold.
    After(FieldValue),
    /// Field value lies in the inclusive range.
    Between(FieldValue, FieldValue),
    /// Field value is *not* a member of the given set.
    Except(Vec<FieldValue>),
}

/// Optional predicate arguments for one selection call.
///
/// # Examples
///
/// ```rust
/// use chronosel::select::SelectionArgs;
/// use chronosel::EmptySelectionPolicy;
///
/// let args = SelectionArgs::new().exact([1991, 1992]);
/// assert!(args.resolve(EmptySelectionPolicy::Fail).unwrap().is_some());
///
/// // Two predicates at once is always an error.
/// let args = SelectionArgs::new().before(1995).after(1990);
/// assert!(args.resolve(EmptySelectionPolicy::Fail).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs {
    exact: Option<Vec<FieldValue>>,
    before: Option<FieldValue>,
    after: Option<FieldValue>,
    between: Option<(FieldValue, FieldValue)>,
    except: Option<Vec<FieldValue>>,
}

impl SelectionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep layers whose field value is in `values`.
    pub fn exact<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.exact = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Keep layers strictly before `threshold`.
    pub fn before(mut self, threshold: impl Into<FieldValue>) -> Self {
        self.before = Some(threshold.into());
        self
    }

    /// Keep layers strictly after `threshold`.
    pub fn after(mut self, threshold: impl Into<FieldValue>) -> Self {
        self.after = Some(threshold.into());
        self
    }

    /// Keep layers between `lo` and `hi`, inclusive on both bounds.
    pub fn between(mut self, lo: impl Into<FieldValue>, hi: impl Into<FieldValue>) -> Self {
        self.between = Some((lo.into(), hi.into()));
        self
    }

    /// Keep layers whose field value is *not* in `values`.
    pub fn except<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.except = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve to the single active predicate.
    ///
    /// This is the one place that counts supplied arguments: more than one
    /// fails with `AmbiguousSelection`; zero follows `policy` (fail, or
    /// warn and return `None` meaning "keep everything").
    pub fn resolve(self, policy: EmptySelectionPolicy) -> Result<Option<SelectionPredicate>> {
        let mut supplied: SmallVec<[(&'static str, SelectionPredicate); 5]> = SmallVec::new();
        if let Some(values) = self.exact {
            supplied.push(("exact", SelectionPredicate::ExactSet(values)));
        }
        if let Some(threshold) = self.before {
            supplied.push(("before", SelectionPredicate::Before(threshold)));
        }
        if let Some(threshold) = self.after {
            supplied.push(("after", SelectionPredicate::After(threshold)));
        }
        if let Some((lo, hi)) = self.between {
            supplied.push(("between", SelectionPredicate::Between(lo, hi)));
        }
        if let Some(values) = self.except {
            supplied.push(("except", SelectionPredicate::Except(values)));
        }
        exactly_one(supplied, policy)
    }
}

/// Shared exactly-one-of-N resolver.
fn exactly_one(
    mut supplied: SmallVec<[(&'static str, SelectionPredicate); 5]>,
    policy: EmptySelectionPolicy,
) -> Result<Option<SelectionPredicate>> {
    match supplied.len() {
        1 => Ok(supplied.pop().map(|(_, predicate)| predicate)),
        0 => match policy {
            EmptySelectionPolicy::Fail => Err(ChronoselError::NoSelectionMade),
            EmptySelectionPolicy::WarnKeepAll => {
                log::warn!("no selection predicate supplied; keeping all layers");
                Ok(None)
            }
        },
        _ => {
            let names: Vec<&str> = supplied.iter().map(|(name, _)| *name).collect();
            Err(ChronoselError::AmbiguousSelection(names.join(", ")))
        }
    }
}

/// Compute the indices of layers whose `field` value matches `predicate`.
///
/// Layers with missing timestamps match no predicate, `except` included.
///
/// # Examples
///
/// ```rust
/// use chronosel::{derive_fields_iso, select::{select_indices, SelectionPredicate}, TemporalField};
///
/// let table = derive_fields_iso(
///     &[Some("1990-01-01"), Some("1991-01-01"), Some("1992-01-01"), Some("1993-01-01")],
///     None,
/// )?;
/// let predicate = SelectionPredicate::ExactSet(vec![1991.into(), 1992.into()]);
/// assert_eq!(select_indices(&table, TemporalField::Year, &predicate)?, vec![1, 2]);
/// # Ok::<(), chronosel::ChronoselError>(())
/// ```
pub fn select_indices(
    table: &DerivedTable,
    field: TemporalField,
    predicate: &SelectionPredicate,
) -> Result<Vec<usize>> {
    table.field_available(field)?;
    let predicate = canonicalize_predicate(field, predicate)?;
    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let value = record.field(field)?;
            value_matches(&predicate, &value).then_some(idx)
        })
        .collect();
    Ok(indices)
}

fn value_matches(predicate: &SelectionPredicate, value: &FieldValue) -> bool {
    match predicate {
        SelectionPredicate::ExactSet(values) => values.contains(value),
        SelectionPredicate::Before(threshold) => value < threshold,
        SelectionPredicate::After(threshold) => value > threshold,
        SelectionPredicate::Between(lo, hi) => value >= lo && value <= hi,
        SelectionPredicate::Except(values) => !values.contains(value),
    }
}

/// Rewrite predicate values into the field's natural ordering form, so
/// callers can pass month-day tokens like `"Jun-04"` or dates like
/// `"7/2/2019"` in any accepted rendering.
fn canonicalize_predicate(
    field: TemporalField,
    predicate: &SelectionPredicate,
) -> Result<SelectionPredicate> {
    let canon = |value: &FieldValue| canonicalize_value(field, value);
    Ok(match predicate {
        SelectionPredicate::ExactSet(values) => {
            SelectionPredicate::ExactSet(values.iter().map(canon).collect::<Result<_>>()?)
        }
        SelectionPredicate::Before(t) => SelectionPredicate::Before(canon(t)?),
        SelectionPredicate::After(t) => SelectionPredicate::After(canon(t)?),
        SelectionPredicate::Between(lo, hi) => SelectionPredicate::Between(canon(lo)?, canon(hi)?),
        SelectionPredicate::Except(values) => {
            SelectionPredicate::Except(values.iter().map(canon).collect::<Result<_>>()?)
        }
    })
}

fn canonicalize_value(field: TemporalField, value: &FieldValue) -> Result<FieldValue> {
    match field {
        TemporalField::MonthDay => match value {
            FieldValue::Text(token) => Ok(FieldValue::Text(canonical_month_day(token)?)),
            FieldValue::Int(_) => Err(ChronoselError::InvalidDate(format!(
                "month-day values must be tokens, got {}",
                value
            ))),
        },
        TemporalField::Date => match value {
            FieldValue::Text(token) => Ok(FieldValue::Text(canonical_date(token)?)),
            FieldValue::Int(_) => Err(ChronoselError::InvalidDate(format!(
                "date values must be tokens, got {}",
                value
            ))),
        },
        TemporalField::Time | TemporalField::DateTime => match value {
            FieldValue::Text(token) => Ok(FieldValue::Text(canonical_time_text(field, token))),
            FieldValue::Int(_) => Err(ChronoselError::InvalidDate(format!(
                "{} values must be tokens, got {}",
                field, value
            ))),
        },
        _ => match value {
            FieldValue::Int(_) => Ok(value.clone()),
            FieldValue::Text(text) => text.trim().parse::<i64>().map(FieldValue::Int).map_err(|_| {
                ChronoselError::InvalidDate(format!(
                    "expected a numeric {} value, got '{}'",
                    field, text
                ))
            }),
        },
    }
}

/// Month-day ordering form is `MM-DD`. A token already in that shape is
/// taken positionally (month first); anything else goes through the
/// month-day parser, which reports genuinely ambiguous tokens.
fn canonical_month_day(token: &str) -> Result<String> {
    let bytes = token.as_bytes();
    if bytes.len() == 5 && bytes[2] == b'-' {
        let month: Option<u32> = token[..2].parse().ok();
        let day: Option<u32> = token[3..].parse().ok();
        if let (Some(month), Some(day)) = (month, day) {
            if (1..=12).contains(&month) && (1..=31).contains(&day) {
                return Ok(token.to_string());
            }
        }
    }
    normalize_month_day(token, MonthDayForm::MM_DD, "-")
}

/// Time-of-day and full-timestamp thresholds compare lexicographically in
/// `HH:MM:SS` / `YYYY-MM-DD HH:MM:SS` form; a `T` separator is accepted
/// and seconds default to `:00`.
fn canonical_time_text(field: TemporalField, token: &str) -> String {
    let mut text = token.trim().replace('T', " ");
    let bare_minutes = match field {
        TemporalField::Time => text.len() == 5,
        _ => text.len() == 16,
    };
    if bare_minutes {
        text.push_str(":00");
    }
    text
}

fn canonical_date(token: &str) -> Result<String> {
    let bytes = token.as_bytes();
    let iso_shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && token.chars().enumerate().all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if iso_shaped {
        return Ok(token.to_string());
    }
    normalize_date(token, DateForm::ISO, "-")
}
