//! Full date token normalization.
//!
//! A date token has exactly three separator-delimited parts. The
//! four-digit part is the year; the literal middle part is the month by
//! convention, which deliberately supports `YYYY-MM-DD` and `DD-MM-YYYY`
//! but never `MM-DD-YYYY`. Leap-day validity is not checked here:
//! `"29-02-2019"` is a well-formed token.

use crate::error::{ChronoselError, Result};
use crate::token::month::{month_number, render_month, MonthForm, NameCase};
use crate::token::month_day::{locate_year, MonthRender};
use crate::token::{canonical_sep, split_token};

/// Which end of the rendered date carries the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// `2019-02-07`
    #[default]
    YearFirst,
    /// `07-02-2019`
    DayFirst,
}

/// Output form for a normalized date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateForm {
    pub order: DateOrder,
    pub month: MonthRender,
}

impl DateForm {
    /// `2019-02-07` — the canonical ISO form.
    pub const ISO: DateForm = DateForm {
        order: DateOrder::YearFirst,
        month: MonthRender::Padded,
    };
    /// `07-02-2019`
    pub const DMY: DateForm = DateForm {
        order: DateOrder::DayFirst,
        month: MonthRender::Padded,
    };
    /// `2019-Feb-07`
    pub const YEAR_MON_DAY: DateForm = DateForm {
        order: DateOrder::YearFirst,
        month: MonthRender::Abbrev,
    };
    /// `07-Feb-2019`
    pub const DAY_MON_YEAR: DateForm = DateForm {
        order: DateOrder::DayFirst,
        month: MonthRender::Abbrev,
    };
}

impl Default for DateForm {
    fn default() -> Self {
        DateForm::ISO
    }
}

/// Normalize a three-part date token into the requested form.
///
/// # Examples
///
/// ```rust
/// use chronosel::token::date::{normalize_date, DateForm};
///
/// assert_eq!(
///     normalize_date("7/2/2019", DateForm::ISO, "-").unwrap(),
///     "2019-02-07"
/// );
/// assert_eq!(
///     normalize_date("2019-Feb-07", DateForm::DMY, "-").unwrap(),
///     "07-02-2019"
/// );
/// // Leap days are valid tokens; the completeness filter is the only
/// // place that treats Feb-29 specially.
/// assert!(normalize_date("29-02-2019", DateForm::ISO, "-").is_ok());
/// ```
pub fn normalize_date(token: &str, form: DateForm, sep: &str) -> Result<String> {
    let sep = canonical_sep(sep);
    let parts = split_token(token, sep);
    if parts.len() != 3 {
        return Err(ChronoselError::InvalidDate(format!(
            "expected three date parts in '{}', found {}",
            token,
            parts.len()
        )));
    }

    let year_idx = locate_year(&parts, token)?;
    if year_idx == 1 {
        return Err(ChronoselError::InvalidDate(format!(
            "year occupies the month position in '{}'",
            token
        )));
    }
    let year: i32 = parts[year_idx]
        .parse()
        .map_err(|_| ChronoselError::InvalidDate(format!("unreadable year in '{}'", token)))?;

    let month = month_number(&parts[1]).map_err(|_| {
        ChronoselError::InvalidDate(format!(
            "month part '{}' of '{}' is not a month",
            parts[1], token
        ))
    })?;

    let day_idx = if year_idx == 0 { 2 } else { 0 };
    let day: u32 = match parts[day_idx].parse() {
        Ok(day) if (1..=31).contains(&day) => day,
        _ => {
            return Err(ChronoselError::InvalidDate(format!(
                "day part '{}' of '{}' is not a day of month",
                parts[day_idx], token
            )))
        }
    };

    Ok(render_date(year, month, day, form, sep))
}

fn render_date(year: i32, month: u32, day: u32, form: DateForm, sep: &str) -> String {
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
        DateOrder::YearFirst => format!("{:04}{}{}{}{}", year, sep, month_str, sep, day_str),
        DateOrder::DayFirst => format!("{}{}{}{}{:04}", day_str, sep, month_str, sep, year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_and_dmy_inputs() {
        assert_eq!(
            normalize_date("2019-02-07", DateForm::ISO, "-").unwrap(),
            "2019-02-07"
        );
        assert_eq!(
            normalize_date("07-02-2019", DateForm::ISO, "-").unwrap(),
            "2019-02-07"
        );
        assert_eq!(
            normalize_date("2019-02-07", DateForm::DMY, "-").unwrap(),
            "07-02-2019"
        );
    }

    #[test]
    fn test_named_month_disambiguates_four_characters() {
        // "June" has four characters but is not a year.
        assert_eq!(
            normalize_date("2019-June-07", DateForm::ISO, "-").unwrap(),
            "2019-06-07"
        );
        assert_eq!(
            normalize_date("07 July 2019", DateForm::YEAR_MON_DAY, "-").unwrap(),
            "2019-Jul-07"
        );
    }

    #[test]
    fn test_leap_day_is_a_valid_token() {
        assert_eq!(
            normalize_date("29-02-2019", DateForm::ISO, "-").unwrap(),
            "2019-02-29"
        );
    }

    #[test]
    fn test_rejects_multiple_year_candidates() {
        let err = normalize_date("1100-1200-2019", DateForm::ISO, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));
    }

    #[test]
    fn test_rejects_year_in_month_position() {
        let err = normalize_date("07-2019-12", DateForm::ISO, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));
    }

    #[test]
    fn test_rejects_wrong_part_count() {
        assert!(normalize_date("2019-02", DateForm::ISO, "-").is_err());
        assert!(normalize_date("2019-02-07-01", DateForm::ISO, "-").is_err());
    }

    #[test]
    fn test_rejects_non_month_middle() {
        let err = normalize_date("2019-misc-07", DateForm::ISO, "-").unwrap_err();
        assert!(matches!(err, ChronoselError::InvalidDate(_)));
    }

    #[test]
    fn test_separator_aliases_and_output_separator() {
        assert_eq!(
            normalize_date("2019/02/07", DateForm::ISO, "-").unwrap(),
            "2019-02-07"
        );
        assert_eq!(
            normalize_date("2019-02-07", DateForm::ISO, "/").unwrap(),
            "2019/02/07"
        );
    }
}
