//! Core data model: layer timestamps, derived field records, and the
//! derived-field table that selection and completeness filtering consume.

use crate::complete::{CompletenessOutcome, GroupKey};
use crate::config::Config;
use crate::error::{ChronoselError, Result};
use crate::select::SelectionArgs;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// The timestamp attached to one layer of the external collection.
///
/// Layers are opaque to this crate; only their timestamps matter. A layer
/// may carry calendar-date precision, full date-time precision, or no
/// timestamp at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerTime {
    /// No timestamp known for this layer.
    Missing,
    /// Calendar-date precision.
    Date(NaiveDate),
    /// Sub-daily precision.
    DateTime(NaiveDateTime),
}

impl LayerTime {
    /// Parse an ISO-style timestamp: `YYYY-MM-DD`, optionally followed by
    /// `HH:MM` or `HH:MM:SS` (space- or `T`-separated).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronosel::LayerTime;
    ///
    /// let day = LayerTime::from_iso("1991-12-01").unwrap();
    /// assert!(!day.has_time());
    ///
    /// let instant = LayerTime::from_iso("1991-12-01 06:30:00").unwrap();
    /// assert!(instant.has_time());
    /// ```
    pub fn from_iso(s: &str) -> Result<LayerTime> {
        let s = s.trim();
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(LayerTime::DateTime(dt));
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(LayerTime::Date(d));
        }
        Err(ChronoselError::InvalidDate(format!(
            "unreadable timestamp '{}'",
            s
        )))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LayerTime::Missing)
    }

    pub fn has_time(&self) -> bool {
        matches!(self, LayerTime::DateTime(_))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            LayerTime::Missing => None,
            LayerTime::Date(d) => Some(*d),
            LayerTime::DateTime(dt) => Some(dt.date()),
        }
    }
}

/// A selectable derived field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalField {
    Date,
    Year,
    Month,
    Day,
    MonthDay,
    Hour,
    Minute,
    /// Time of day; requires sub-daily timestamps.
    Time,
    /// Full date plus time of day; requires sub-daily timestamps.
    DateTime,
    /// Austral ("southern-hemisphere summer") year; requires a configured
    /// split month.
    Summer,
}

impl TemporalField {
    pub fn name(&self) -> &'static str {
        match self {
            TemporalField::Date => "date",
            TemporalField::Year => "year",
            TemporalField::Month => "month",
            TemporalField::Day => "day",
            TemporalField::MonthDay => "month-day",
            TemporalField::Hour => "hour",
            TemporalField::Minute => "minute",
            TemporalField::Time => "time",
            TemporalField::DateTime => "datetime",
            TemporalField::Summer => "summer",
        }
    }
}

impl fmt::Display for TemporalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemporalField {
    type Err = ChronoselError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(TemporalField::Date),
            "year" => Ok(TemporalField::Year),
            "month" => Ok(TemporalField::Month),
            "day" => Ok(TemporalField::Day),
            "monthday" | "month-day" | "month_day" => Ok(TemporalField::MonthDay),
            "hour" => Ok(TemporalField::Hour),
            "minute" => Ok(TemporalField::Minute),
            "time" => Ok(TemporalField::Time),
            "datetime" | "date-time" | "date_time" => Ok(TemporalField::DateTime),
            "summer" => Ok(TemporalField::Summer),
            other => Err(ChronoselError::UnknownField(other.to_string())),
        }
    }
}

/// A comparable field value.
///
/// Numeric fields (year, month, day, hour, minute, summer) compare as
/// integers; date and month-day compare lexicographically in their ISO /
/// `MM-DD` renderings, which matches calendar order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Derived calendar fields for one layer.
///
/// All fields of a record are simultaneously present or simultaneously
/// absent: a missing timestamp produces an all-`None` record. `hour` and
/// `minute` are populated only when the source timestamp carried sub-daily
/// precision, and `summer` only when a split month was configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedRecord {
    /// ISO calendar date.
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    /// 1-31
    pub day: Option<u32>,
    /// Canonical `Mon-DD` token, e.g. `"Jun-04"`.
    pub month_day: Option<String>,
    /// 0-23; only for sub-daily timestamps.
    pub hour: Option<u32>,
    /// 0-59; only for sub-daily timestamps.
    pub minute: Option<u32>,
    /// Time of day; only for sub-daily timestamps.
    pub time: Option<NaiveTime>,
    /// Full timestamp; only for sub-daily timestamps.
    pub date_time: Option<NaiveDateTime>,
    /// Austral year label.
    pub summer: Option<i32>,
}

impl DerivedRecord {
    pub(crate) fn from_time(time: &LayerTime, split_month: Option<u32>) -> Self {
        let Some(date) = time.date() else {
            return DerivedRecord::default();
        };
        let (year, month, day) = (date.year(), date.month(), date.day());
        let summer = split_month.map(|split| if month > split { year + 1 } else { year });
        let (hour, minute, tod, date_time) = match time {
            LayerTime::DateTime(dt) => {
                (Some(dt.hour()), Some(dt.minute()), Some(dt.time()), Some(*dt))
            }
            _ => (None, None, None, None),
        };
        DerivedRecord {
            date: Some(date),
            year: Some(year),
            month: Some(month),
            day: Some(day),
            month_day: Some(format!(
                "{}-{:02}",
                crate::token::month::MONTH_ABBREV[(month - 1) as usize],
                day
            )),
            hour,
            minute,
            time: tod,
            date_time,
            summer,
        }
    }

    /// Whether this record came from a missing timestamp.
    pub fn is_missing(&self) -> bool {
        self.date.is_none()
    }

    /// The comparable value of one field, in its natural ordering form.
    /// `None` for missing records and unpopulated sub-daily fields.
    pub fn field(&self, field: TemporalField) -> Option<FieldValue> {
        match field {
            TemporalField::Date => self
                .date
                .map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string())),
            TemporalField::Year => self.year.map(|v| FieldValue::Int(v as i64)),
            TemporalField::Month => self.month.map(|v| FieldValue::Int(v as i64)),
            TemporalField::Day => self.day.map(|v| FieldValue::Int(v as i64)),
            // Ordering form is zero-padded numeric so lexicographic order
            // matches calendar order.
            TemporalField::MonthDay => match (self.month, self.day) {
                (Some(m), Some(d)) => Some(FieldValue::Text(format!("{:02}-{:02}", m, d))),
                _ => None,
            },
            TemporalField::Hour => self.hour.map(|v| FieldValue::Int(v as i64)),
            TemporalField::Minute => self.minute.map(|v| FieldValue::Int(v as i64)),
            TemporalField::Time => self
                .time
                .map(|t| FieldValue::Text(t.format("%H:%M:%S").to_string())),
            TemporalField::DateTime => self
                .date_time
                .map(|dt| FieldValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string())),
            TemporalField::Summer => self.summer.map(|v| FieldValue::Int(v as i64)),
        }
    }
}

/// The derived-field table: one [`DerivedRecord`] per layer, order and
/// length matching the input timestamp sequence.
///
/// Recomputed from the raw timestamps on every
/// [`derive_fields`](crate::derive::derive_fields) call; nothing is cached
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct DerivedTable {
    records: Vec<DerivedRecord>,
    has_time: bool,
    split_month: Option<u32>,
}

impl DerivedTable {
    pub(crate) fn new(records: Vec<DerivedRecord>, has_time: bool, split_month: Option<u32>) -> Self {
        DerivedTable {
            records,
            has_time,
            split_month,
        }
    }

    pub fn records(&self) -> &[DerivedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any source timestamp carried sub-daily precision.
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// The split month the table was derived with, if any.
    pub fn split_month(&self) -> Option<u32> {
        self.split_month
    }

    /// Check that `field` is derivable for this dataset.
    pub fn field_available(&self, field: TemporalField) -> Result<()> {
        match field {
            TemporalField::Hour
            | TemporalField::Minute
            | TemporalField::Time
            | TemporalField::DateTime
                if !self.has_time =>
            {
                Err(ChronoselError::FieldUnavailable(format!(
                    "'{}' requires sub-daily timestamps",
                    field
                )))
            }
            TemporalField::Summer if self.split_month.is_none() => {
                Err(ChronoselError::FieldUnavailable(
                    "'summer' requires a configured split month".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Select layer indices whose `field` value matches the predicate in
    /// `args`, under the configured empty-selection policy.
    pub fn select(
        &self,
        field: TemporalField,
        args: SelectionArgs,
        config: &Config,
    ) -> Result<Vec<usize>> {
        match args.resolve(config.on_empty_selection)? {
            Some(predicate) => crate::select::select_indices(self, field, &predicate),
            // Warn-and-keep-all: the index set is unchanged.
            None => Ok((0..self.records.len()).collect()),
        }
    }

    /// Drop whole groups (calendar or austral years) that do not contain
    /// every calendar unit present elsewhere in the dataset.
    pub fn exclude_incomplete_groups(
        &self,
        key: GroupKey,
        config: &Config,
    ) -> Result<CompletenessOutcome> {
        crate::complete::exclude_incomplete_groups(self, key, config.granularity(), config.print_clarity)
    }

    /// Drop calendar units not present in every group (the dual of
    /// [`exclude_incomplete_groups`](Self::exclude_incomplete_groups)).
    pub fn exclude_unmatched_units(
        &self,
        key: GroupKey,
        config: &Config,
    ) -> Result<CompletenessOutcome> {
        crate::complete::exclude_unmatched_units(self, key, config.granularity(), config.print_clarity)
    }
}
