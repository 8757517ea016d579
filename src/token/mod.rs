//! Normalization of ambiguous human-entered calendar tokens.
//!
//! Three parsers share one convention set:
//! - [`month`]: single month tokens (`"7"`, `"07"`, `"Jul"`, `"july"`).
//! - [`month_day`]: month-day tokens with optional embedded year
//!   (`"7 Feb"`, `"2019-02-25"`), rendered with a selectable field order
//!   and month style.
//! - [`date`]: full three-part dates (`"2019-02-07"`, `"07-02-2019"`).
//!
//! Output forms are closed enums rather than format strings, so every
//! rendering path is an exhaustive match.

pub mod date;
pub mod month;
pub mod month_day;

use smallvec::SmallVec;

/// Separator characters treated as equivalent to the canonical separator.
/// The hyphen is included so hyphen-delimited input still splits when the
/// caller requests a different output separator.
const SEPARATOR_ALIASES: [char; 4] = ['/', '_', ' ', '-'];

/// An empty separator falls back to the canonical hyphen.
pub(crate) fn canonical_sep(sep: &str) -> &str {
    if sep.is_empty() {
        "-"
    } else {
        sep
    }
}

/// Canonicalize separators and split a token into its non-empty parts.
pub(crate) fn split_token(token: &str, sep: &str) -> SmallVec<[String; 4]> {
    let mut canon = token.trim().to_string();
    for alias in SEPARATOR_ALIASES {
        canon = canon.replace(alias, sep);
    }
    canon
        .split(sep)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
