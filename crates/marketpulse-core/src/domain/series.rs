use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// Fully populated daily price row.
///
/// After normalization every row carries all six fields; `adj_close`
/// defaults to `close` when the upstream source drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
}

impl PriceRow {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        // Adjusted close may fall outside the raw OHLC range after
        // split/dividend adjustment, so it is only bounds-free validated.
        validate_non_negative("adj_close", adj_close)?;
        validate_non_negative("volume", volume)?;

        if high < low {
            return Err(ValidationError::InvalidRowRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidRowBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        })
    }
}

/// The pipeline's single normalized representation of a price history.
///
/// Rows are strictly increasing by date with no duplicates. The series is
/// immutable after construction except for explicit derived-column
/// attachment (indicator values aligned one value per row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSeries {
    symbol: Symbol,
    rows: Vec<PriceRow>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    derived: BTreeMap<String, Vec<Option<f64>>>,
}

impl CanonicalSeries {
    pub fn new(symbol: Symbol, rows: Vec<PriceRow>) -> Result<Self, ValidationError> {
        for pair in rows.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::NonMonotonicSeries {
                    date: pair[1].date.format_iso8601(),
                });
            }
        }

        Ok(Self {
            symbol,
            rows,
            derived: BTreeMap::new(),
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&PriceRow> {
        self.rows.last()
    }

    pub fn dates(&self) -> impl Iterator<Item = TradingDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    pub fn adj_closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.adj_close)
    }

    /// Attach an indicator column aligned to the rows.
    pub fn attach_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), ValidationError> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(ValidationError::DerivedColumnLength {
                name,
                len: values.len(),
                rows: self.rows.len(),
            });
        }
        if self.derived.contains_key(&name) {
            return Err(ValidationError::DerivedColumnExists { name });
        }

        self.derived.insert(name, values);
        Ok(())
    }

    pub fn derived(&self, name: &str) -> Option<&[Option<f64>]> {
        self.derived.get(name).map(Vec::as_slice)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
