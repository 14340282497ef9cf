//! Upstream price-table shapes as delivered by history providers.
//!
//! Providers disagree on column naming (sometimes ticker-qualified compound
//! labels), on whether the timestamp is a column or the frame index, and on
//! whether an adjusted close is present at all. `normalize` collapses every
//! shape modeled here into one [`crate::CanonicalSeries`].

use serde::{Deserialize, Serialize};

/// Column label as it arrives from upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLabel {
    Flat(String),
    /// Ticker-qualified namespace, e.g. `("Close", "TSLA")`.
    Compound(Vec<String>),
}

impl ColumnLabel {
    /// Base field name: the first element of a compound label.
    pub fn base(&self) -> &str {
        match self {
            Self::Flat(name) => name,
            Self::Compound(parts) => parts.first().map_or("", String::as_str),
        }
    }
}

/// One upstream column of numeric cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub label: ColumnLabel,
    pub values: Vec<f64>,
}

impl RawColumn {
    pub fn flat(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: ColumnLabel::Flat(name.into()),
            values,
        }
    }

    pub fn compound(parts: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            label: ColumnLabel::Compound(parts),
            values,
        }
    }
}

/// Where row timestamps live in the upstream table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampAxis {
    /// Explicit date column already materialized by the provider.
    Column(Vec<String>),
    /// Timestamps carried as the frame index, not a column.
    Index(Vec<String>),
}

impl TimestampAxis {
    pub fn values(&self) -> &[String] {
        match self {
            Self::Column(values) | Self::Index(values) => values,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// Column-major price table of unspecified shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub timestamps: TimestampAxis,
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new(timestamps: TimestampAxis, columns: Vec<RawColumn>) -> Self {
        Self {
            timestamps,
            columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }
}
