//! Temporal selection over time-stamped layer collections.
//!
//! Given an ordered collection of data layers where each layer carries a
//! timestamp (or none), chronosel derives comparable calendar fields,
//! normalizes ambiguous month/month-day/date tokens, evaluates mutually
//! exclusive selection predicates, and performs group-based completeness
//! filtering. Every operation produces an index set; applying it to the
//! layer collection is the caller's job.
//!
//! ```rust
//! use chronosel::prelude::*;
//!
//! let stamps = vec![
//!     LayerTime::from_iso("1991-12-01")?,
//!     LayerTime::from_iso("1992-01-15")?,
//!     LayerTime::from_iso("1991-06-01")?,
//! ];
//! let table = derive_fields(&stamps, Some(3))?;
//!
//! // Layers falling in austral summer 1992.
//! let config = Config::default();
//! let indices = table.select(TemporalField::Summer, SelectionArgs::new().exact([1992]), &config)?;
//! assert_eq!(indices, vec![0, 1]);
//! # Ok::<(), chronosel::ChronoselError>(())
//! ```

pub mod complete;
pub mod config;
pub mod derive;
pub mod error;
pub mod select;
pub mod token;
pub mod types;

pub use config::{Config, EmptySelectionPolicy};
pub use error::{ChronoselError, Result};

pub use derive::{derive_fields, derive_fields_iso};
pub use types::{DerivedRecord, DerivedTable, FieldValue, LayerTime, TemporalField};

pub use select::{SelectionArgs, SelectionPredicate};

pub use complete::{
    exclude_incomplete_groups, exclude_unmatched_units, CompletenessOutcome, GroupKey,
    UnitGranularity,
};

pub use token::date::{normalize_date, DateForm, DateOrder};
pub use token::month::{normalize_month, MonthForm, NameCase};
pub use token::month_day::{normalize_month_day, FieldOrder, MonthDayForm, MonthRender};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ChronoselError, Config, EmptySelectionPolicy, Result};

    pub use crate::{derive_fields, derive_fields_iso};

    pub use crate::{DerivedRecord, DerivedTable, FieldValue, LayerTime, TemporalField};

    pub use crate::{SelectionArgs, SelectionPredicate};

    pub use crate::{CompletenessOutcome, GroupKey, UnitGranularity};

    pub use crate::{DateForm, MonthDayForm, MonthForm};
}
