//! Month token parsing and rendering.
//!
//! Accepts a month as a number (`"7"`), a zero-padded string (`"07"`), a
//! three-letter abbreviation (`"Jul"`), or a full name (`"July"`), in any
//! case, and re-renders it in any of those forms. A single initial letter
//! (`"J"`) is an output-only form: it is ambiguous on input and never
//! accepted.

use crate::error::{ChronoselError, Result};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Three-letter month abbreviations, January first.
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month names, January first.
pub const MONTH_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Lowercased name/abbreviation lookup, built once.
static NAME_TO_NUMBER: Lazy<FxHashMap<String, u32>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for (i, (abbr, full)) in MONTH_ABBREV.iter().zip(MONTH_FULL.iter()).enumerate() {
        let number = i as u32 + 1;
        map.insert(abbr.to_ascii_lowercase(), number);
        map.insert(full.to_ascii_lowercase(), number);
    }
    map
});

/// Letter case for rendered month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCase {
    /// `Jan` / `January`
    #[default]
    Title,
    /// `jan` / `january`
    Lower,
    /// `JAN` / `JANUARY`
    Upper,
}

/// Output form for a normalized month token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthForm {
    /// `7`
    Unpadded,
    /// `07`
    Padded,
    /// `Jul` (case selectable)
    Abbrev(NameCase),
    /// `July` (case selectable)
    Full(NameCase),
    /// `J` — the abbreviation's first letter. Output-only.
    Initial,
}

impl Default for MonthForm {
    fn default() -> Self {
        MonthForm::Abbrev(NameCase::Title)
    }
}

fn apply_case(name: &str, case: NameCase) -> String {
    match case {
        NameCase::Title => name.to_string(),
        NameCase::Lower => name.to_ascii_lowercase(),
        NameCase::Upper => name.to_ascii_uppercase(),
    }
}

/// Parse a month token into its number (1-12).
///
/// Accepts numeric strings (padded or not), abbreviations, and full names,
/// case-insensitively. Returns `None` for anything else, including initials.
///
/// # Examples
///
/// ```rust
/// use chronosel::token::month::parse_month;
///
/// assert_eq!(parse_month("02"), Some(2));
/// assert_eq!(parse_month("september"), Some(9));
/// assert_eq!(parse_month("SEP"), Some(9));
/// assert_eq!(parse_month("13"), None);
/// assert_eq!(parse_month("J"), None);
/// ```
pub fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        // At most two digits: "007" is not an accepted month form.
        if token.len() > 2 {
            return None;
        }
        return match token.parse::<u32>() {
            Ok(n) if (1..=12).contains(&n) => Some(n),
            _ => None,
        };
    }
    NAME_TO_NUMBER.get(&token.to_ascii_lowercase()).copied()
}

/// Strict variant of [`parse_month`] for call sites that require a month.
pub fn month_number(token: &str) -> Result<u32> {
    parse_month(token).ok_or_else(|| ChronoselError::InvalidMonth(token.to_string()))
}

/// Render a month number (1-12) in the requested form.
pub fn render_month(month: u32, form: MonthForm) -> String {
    debug_assert!((1..=12).contains(&month));
    let idx = (month - 1) as usize;
    match form {
        MonthForm::Unpadded => month.to_string(),
        MonthForm::Padded => format!("{:02}", month),
        MonthForm::Abbrev(case) => apply_case(MONTH_ABBREV[idx], case),
        MonthForm::Full(case) => apply_case(MONTH_FULL[idx], case),
        MonthForm::Initial => MONTH_ABBREV[idx][..1].to_string(),
    }
}

/// Normalize a month token into the requested output form.
///
/// Unrecognized input is returned unchanged: this is a reformatting
/// utility, not a validator. Call [`month_number`] first when strictness
/// is required.
///
/// # Examples
///
/// ```rust
/// use chronosel::token::month::{normalize_month, MonthForm, NameCase};
///
/// assert_eq!(normalize_month("7", MonthForm::Padded), "07");
/// assert_eq!(normalize_month("07", MonthForm::Full(NameCase::Title)), "July");
/// assert_eq!(normalize_month("july", MonthForm::Abbrev(NameCase::Upper)), "JUL");
/// assert_eq!(normalize_month("December", MonthForm::Initial), "D");
/// // Passthrough for anything unrecognized.
/// assert_eq!(normalize_month("not-a-month", MonthForm::Padded), "not-a-month");
/// ```
pub fn normalize_month(token: &str, form: MonthForm) -> String {
    match parse_month(token) {
        Some(month) => render_month(month, form),
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_accepted_forms() {
        for month in 1..=12u32 {
            let idx = (month - 1) as usize;
            assert_eq!(parse_month(&month.to_string()), Some(month));
            assert_eq!(parse_month(&format!("{:02}", month)), Some(month));
            assert_eq!(parse_month(MONTH_ABBREV[idx]), Some(month));
            assert_eq!(parse_month(MONTH_FULL[idx]), Some(month));
            assert_eq!(parse_month(&MONTH_ABBREV[idx].to_uppercase()), Some(month));
            assert_eq!(parse_month(&MONTH_FULL[idx].to_lowercase()), Some(month));
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("00"), None);
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("007"), None);
        assert_eq!(parse_month(""), None);
        assert_eq!(parse_month("Janu"), None);
    }

    #[test]
    fn test_initials_are_output_only() {
        assert_eq!(render_month(6, MonthForm::Initial), "J");
        assert_eq!(parse_month("J"), None);
        assert_eq!(parse_month("D"), None);
    }

    #[test]
    fn test_round_trip_through_number() {
        // Every regular form survives form -> number -> form.
        let forms = [
            MonthForm::Unpadded,
            MonthForm::Padded,
            MonthForm::Abbrev(NameCase::Title),
            MonthForm::Abbrev(NameCase::Lower),
            MonthForm::Full(NameCase::Title),
            MonthForm::Full(NameCase::Upper),
        ];
        for month in 1..=12u32 {
            for form in forms {
                let rendered = render_month(month, form);
                let number = normalize_month(&rendered, MonthForm::Unpadded);
                assert_eq!(normalize_month(&number, form), rendered);
            }
        }
    }

    #[test]
    fn test_passthrough_keeps_input_verbatim() {
        assert_eq!(normalize_month("??", MonthForm::Padded), "??");
        assert_eq!(normalize_month("Mai", MonthForm::Padded), "Mai");
    }

    #[test]
    fn test_month_number_strict() {
        assert_eq!(month_number("Feb").unwrap(), 2);
        assert!(matches!(
            month_number("Smarch"),
            Err(ChronoselError::InvalidMonth(_))
        ));
    }
}
