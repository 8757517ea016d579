//! Month-day token normalization.
//!
//! A month-day token pairs a month with a day of month, ignoring year.
//! The canonical form is `Mon-DD` (`"Jun-04"`); alternate renderings swap
//! the field order or use numeric months. An embedded four-digit year in a
//! three-part token is stripped before normalization.

use crate::error::{ChronoselError, Result};
use crate::token::month::{month_number, parse_month, render_month, MonthForm, NameCase};
use crate::token::{canonical_sep, split_token};
use smallvec::SmallVec;

/// Which field comes first in the rendered token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// `Jun-04`, `06-04`
    #[default]
    MonthFirst,
    /// `04-Jun`, `04-06`
    DayFirst,
}

/// How the month field is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthRender {
    /// Three-letter abbreviation: `Jun-04`
    #[default]
    Abbrev,
    /// Zero-padded number: `06-04`
    Padded,
    /// Bare number, with the day also unpadded: `6-4`
    Bare,
}

/// Output form for a normalized month-day token: field order plus month
/// rendering. The closed set of combinations covers the canonical
/// renderings `Mon-DD`, `DD-Mon`, `MM-DD`, `DD-MM`, `M-D`, and `D-M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthDayForm {
    pub order: FieldOrder,
    pub month: MonthRender,
}

impl MonthDayForm {
    /// `Jun-04` — the canonical form.
    pub const MON_DD: MonthDayForm = MonthDayForm {
        order: FieldOrder::MonthFirst,
        month: MonthRender::Abbrev,
    };
    /// `04-Jun`
    pub const DD_MON: MonthDayForm = MonthDayForm {
        order: FieldOrder::DayFirst,
        month: MonthRender::Abbrev,
    };
    /// `06-04`
    pub const MM_DD: MonthDayForm = MonthDayForm {
        order: FieldOrder::MonthFirst,
        month: MonthRender::Padded,
    };
    /// `04-06`
    pub const DD_MM: MonthDayForm = MonthDayForm {
        order: FieldOrder::DayFirst,
        month: MonthRender::Padded,
    };
    /// `6-4`
    pub const M_D: MonthDayForm = MonthDayForm {
        order: FieldOrder::MonthFirst,
        month: MonthRender::Bare,
    };
    /// `4-6`
    pub const D_M: MonthDayForm = MonthDayForm {
        order: FieldOrder::DayFirst,
        month: MonthRender::Bare,
    };
}

/// Normalize a month-day token into the requested form.
///
/// `/`, `_`, and space are treated as equivalent to the canonical
/// separator. A three-part token has its four-digit year stripped first
/// (the middle part is then the month, matching the `YYYY-MM-DD` /
/// `DD-MM-YYYY` convention). Two bare numbers that are both plausible
/// months fail with `AmbiguousDate` rather than being guessed.
///
/// # Examples
///
/// ```rust
/// use chronosel::token::month_day::{normalize_month_day, MonthDayForm};
///
/// assert_eq!(
///     normalize_month_day("7 Feb", MonthDayForm::MON_DD, "-").unwrap(),
///     "Feb-07"
/// );
/// assert_eq!(
///     normalize_month_day("2019-02-25", MonthDayForm::MM_DD, "-").unwrap(),
///     "02-25"
/// );
/// // Both parts could be the month: reported, never guessed.
/// assert!(normalize_month_day("01-02", MonthDayForm::MON_DD, "-").is_err());
/// ```
pub fn normalize_month_day(token: &str, form: MonthDayForm, sep: &str) -> Result<String> {
    let sep = canonical_sep(sep);
    let mut parts = split_token(token, sep);

    if parts.len() == 3 {
        parts = strip_year(parts, token)?;
    }
    if parts.len() != 2 {
        return Err(ChronoselError::InvalidDate(format!(
            "expected a month and a day in '{}', found {} part(s)",
            token,
            parts.len()
        )));
    }

    let (month, day) = identify_month_day(&parts[0], &parts[1], token)?;
    Ok(render_month_day(month, day, form, sep))
}

/// Remove the four-digit year from a three-part token, resolving the month
/// from the middle position and re-rendering it as an unambiguous
/// abbreviation.
fn strip_year(parts: SmallVec<[String; 4]>, token: &str) -> Result<SmallVec<[String; 4]>> {
    let year_idx = locate_year(&parts, token)?;
    if year_idx == 1 {
        return Err(ChronoselError::InvalidDate(format!(
            "year occupies the month position in '{}'",
            token
        )));
    }
    let month = month_number(&parts[1]).map_err(|_| {
        ChronoselError::InvalidDate(format!(
            "month part '{}' of '{}' is not a month",
            parts[1], token
        ))
    })?;
    let day_idx = if year_idx == 0 { 2 } else { 0 };

    let mut remaining = SmallVec::new();
    remaining.push(render_month(month, MonthForm::Abbrev(NameCase::Title)));
    remaining.push(parts[day_idx].clone());
    Ok(remaining)
}

/// Locate the single all-numeric four-character part. Four-letter month
/// names (`June`, `July`) occupy the same character count and are not
/// years.
pub(crate) fn locate_year(parts: &[String], token: &str) -> Result<usize> {
    let candidates: SmallVec<[usize; 3]> = parts
        .iter()
        .enumerate()
        .filter(|(_, part)| part.len() == 4 && part.chars().all(|c| c.is_ascii_digit()))
        .map(|(i, _)| i)
        .collect();
    match candidates.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(ChronoselError::InvalidDate(format!(
            "no four-digit year in '{}'",
            token
        ))),
        _ => Err(ChronoselError::InvalidDate(format!(
            "more than one four-digit part in '{}'",
            token
        ))),
    }
}

/// Decide which of two sub-tokens is the month and which is the day.
fn identify_month_day(a: &str, b: &str, token: &str) -> Result<(u32, u32)> {
    let a_numeric = numeric(a);
    let b_numeric = numeric(b);
    let a_name = if a_numeric.is_none() { parse_month(a) } else { None };
    let b_name = if b_numeric.is_none() { parse_month(b) } else { None };

    match (a_name, b_name) {
        (Some(_), Some(_)) => Err(ChronoselError::InvalidDate(format!(
            "two month names in '{}'",
            token
        ))),
        (Some(month), None) => Ok((month, day_of_month(b_numeric, token)?)),
        (None, Some(month)) => Ok((month, day_of_month(a_numeric, token)?)),
        (None, None) => {
            let a_n = day_of_month(a_numeric, token)?;
            let b_n = day_of_month(b_numeric, token)?;
            let a_plausible = (1..=12).contains(&a_n);
            let b_plausible = (1..=12).contains(&b_n);
            match (a_plausible, b_plausible) {
                (true, true) => Err(ChronoselError::AmbiguousDate(format!(
                    "'{}': both parts could be the month",
                    token
                ))),
                (true, false) => Ok((a_n, b_n)),
                (false, true) => Ok((b_n, a_n)),
                (false, false) => Err(ChronoselError::InvalidDate(format!(
                    "no month component in '{}'",
                    token
                ))),
            }
        }
    }
}

fn numeric(part: &str) -> Option<u32> {
    if !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

fn day_of_month(value: Option<u32>, token: &str) -> Result<u32> {
    match value {
        Some(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(ChronoselError::InvalidDate(format!(
            "day out of range [1, 31] in '{}'",
            token
        ))),
    }
}

pub(crate) fn render_month_day(month: u32, day: u32, form: MonthDayForm, sep: &str) -> String {
    let month_str = match form.month {
        MonthRender::Abbrev => render_month(month, MonthForm::Abbrev(NameCase::Title)),
        MonthRender::Padded => format!("{:02}", month),
        MonthRender::Bare => month.to_string(),
    };
    let day_str = match form.month {
        MonthRender::Bare => day.to_string(),
        _ => format!("{:02}", day),
    };
    match form.order {
        FieldOrder::MonthFirst => format!("{}{}{}", month_str, sep, day_str),
        FieldOrder::DayFirst => format!("{}{}{}", day_str, sep, month_str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(
            normalize_month_day("7 Feb", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-07"
        );
        assert_eq!(
            normalize_month_day("Feb 7", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-07"
        );
        assert_eq!(
            normalize_month_day("25 Jun", MonthDayForm::DD_MON, "-").unwrap(),
            "25-Jun"
        );
    }

    #[test]
    fn test_all_output_forms() {
        let token = "Jun 4";
        let cases = [
            (MonthDayForm::MON_DD, "Jun-04"),
            (MonthDayForm::DD_MON, "04-Jun"),
            (MonthDayForm::MM_DD, "06-04"),
            (MonthDayForm::DD_MM, "04-06"),
            (MonthDayForm::M_D, "6-4"),
            (MonthDayForm::D_M, "4-6"),
        ];
        for (form, expected) in cases {
            assert_eq!(normalize_month_day(token, form, "-").unwrap(), expected);
        }
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(
            normalize_month_day("7 Feb", MonthDayForm::MON_DD, "/").unwrap(),
            "Feb/07"
        );
    }

    #[test]
    fn test_year_stripping() {
        assert_eq!(
            normalize_month_day("2019-02-25", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-25"
        );
        assert_eq!(
            normalize_month_day("25-02-2019", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-25"
        );
        assert_eq!(
            normalize_month_day("2019 June 07", MonthDayForm::MM_DD, "-").unwrap(),
            "06-07"
        );
    }

    #[test]
    fn test_year_stripping_resolves_numeric_ambiguity() {
        // With the year present, the middle part is the month by
        // convention, so "2019-02-07" is not ambiguous.
        assert_eq!(
            normalize_month_day("2019-02-07", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-07"
        );
    }

    #[test]
    fn test_ambiguous_bare_numbers() {
        let err = normalize_month_day("01-02", MonthDayForm::MON_DD, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::AmbiguousDate(_)));

        let err = normalize_month_day("12/11", MonthDayForm::MON_DD, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::AmbiguousDate(_)));
    }

    #[test]
    fn test_disambiguated_bare_numbers() {
        // 25 cannot be a month, so 2 must be.
        assert_eq!(
            normalize_month_day("25-2", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-25"
        );
        assert_eq!(
            normalize_month_day("2-25", MonthDayForm::MON_DD, "-").unwrap(),
            "Feb-25"
        );
    }

    #[test]
    fn test_no_month_component() {
        let err = normalize_month_day("25-30", MonthDayForm::MON_DD, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));

        let err = normalize_month_day("Feb-Mar", MonthDayForm::MON_DD, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));
    }

    #[test]
    fn test_invalid_part_counts() {
        assert!(normalize_month_day("Feb", MonthDayForm::MON_DD, "-").is_err());
        assert!(normalize_month_day("1-2-3-4", MonthDayForm::MON_DD, "-").is_err());
    }

    #[test]
    fn test_idempotent_for_unambiguous_forms() {
        let once = normalize_month_day("7 Feb", MonthDayForm::MON_DD, "-").unwrap();
        let twice = normalize_month_day(&once, MonthDayForm::MON_DD, "-").unwrap();
        assert_eq!(once, twice);

        let once = normalize_month_day("25 Feb", MonthDayForm::MM_DD, "-").unwrap();
        let twice = normalize_month_day(&once, MonthDayForm::MM_DD, "-").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_day_out_of_range() {
        let err = normalize_month_day("Feb-32", MonthDayForm::MON_DD, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));
    }
}
