//! Typed CSV rows and numeric coercion.
//!
//! A row maps field names to loosely typed values. Numeric interpretation
//! happens only through [`FieldValue::coerce`], which turns anything that
//! is not a number into a NaN gap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-row timestamp in seconds.
pub const TIME_FIELD: &str = "time_sec";

/// Per-row frame index, converted to seconds with the fallback frame rate.
pub const FRAME_FIELD: &str = "frame";

/// Provenance tag written by the tracking pipeline.
pub const SOURCE_FIELD: &str = "source";

/// Fields that carry timing or provenance rather than metrics.
pub const RESERVED_FIELDS: [&str; 3] = [TIME_FIELD, FRAME_FIELD, SOURCE_FIELD];

/// Whether `name` is one of the reserved, non-metric fields.
pub fn is_reserved_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// A single loosely typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl FieldValue {
    /// Interpret a raw CSV cell. Empty cells are `Missing`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell; NaN when it is not a number.
    pub fn coerce(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            Self::Missing => f64::NAN,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One sampled record, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing rows in code.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Coerced numeric value of `name`; NaN when absent or non-numeric.
    pub fn number(&self, name: &str) -> f64 {
        self.fields.get(name).map_or(f64::NAN, FieldValue::coerce)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
