//! Error types for chronosel.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ChronoselError>;

/// Errors produced by token parsing, selection, and configuration.
///
/// Parsing and selection errors fail fast: no partial index set is ever
/// returned alongside one of these. Zero-survivor completeness results are
/// *not* errors; they come back as an explicit empty
/// [`CompletenessOutcome`](crate::complete::CompletenessOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChronoselError {
    /// A month token could not be parsed as a number 1-12, an
    /// abbreviation, or a full month name.
    #[error("invalid month token: '{0}'")]
    InvalidMonth(String),

    /// A date or month-day token violated the accepted-format rules.
    #[error("invalid date token: {0}")]
    InvalidDate(String),

    /// Two numeric parts of a token are both plausible as day or month.
    /// Reported rather than guessed.
    #[error("ambiguous date token: {0}")]
    AmbiguousDate(String),

    /// More than one selection predicate was supplied in a single call.
    #[error("ambiguous selection: more than one predicate supplied ({0})")]
    AmbiguousSelection(String),

    /// No selection predicate was supplied and the configuration demands one.
    #[error("no selection made: no predicate was supplied")]
    NoSelectionMade,

    /// A split month outside [1, 12] was configured.
    #[error("split month out of range [1, 12]: {0}")]
    InvalidSplitMonth(u32),

    /// A field name did not match any derivable temporal field.
    #[error("unknown temporal field: '{0}'")]
    UnknownField(String),

    /// The requested field is not derivable for this dataset, e.g. `hour`
    /// on date-only timestamps or `summer` without a configured split month.
    #[error("field not available for this dataset: {0}")]
    FieldUnavailable(String),

    /// Invalid configuration values.
    #[error("configuration error: {0}")]
    Config(String),
}
