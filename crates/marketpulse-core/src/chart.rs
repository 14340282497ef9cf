//! Chart-ready projections of a canonical series.
//!
//! All three encodings read adjusted close as the price value so charts
//! and indicators stay mutually consistent; raw close is never projected.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CanonicalSeries, TradingDate, ValidationError};

/// Supported chart encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Candlestick,
}

impl ChartKind {
    pub const ALL: [Self; 3] = [Self::Line, Self::Bar, Self::Candlestick];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Candlestick => "candlestick",
        }
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "candlestick" => Ok(Self::Candlestick),
            other => Err(ValidationError::InvalidChartKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// (date, adjusted close) pair for line and bar encodings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub value: f64,
}

/// OHLC tuple for the candlestick encoding; `close` carries adjusted
/// close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Minimal column projection for one chart encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "points", rename_all = "snake_case")]
pub enum ChartProjection {
    Price(Vec<PricePoint>),
    Candles(Vec<CandlePoint>),
}

impl ChartProjection {
    pub fn len(&self) -> usize {
        match self {
            Self::Price(points) => points.len(),
            Self::Candles(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project the full canonical range, warm-up prefix included.
pub fn project(series: &CanonicalSeries, kind: ChartKind) -> ChartProjection {
    match kind {
        ChartKind::Line | ChartKind::Bar => ChartProjection::Price(
            series
                .rows()
                .iter()
                .map(|row| PricePoint {
                    date: row.date,
                    value: row.adj_close,
                })
                .collect(),
        ),
        ChartKind::Candlestick => ChartProjection::Candles(
            series
                .rows()
                .iter()
                .map(|row| CandlePoint {
                    date: row.date,
                    open: row.open,
                    high: row.high,
                    low: row.low,
                    close: row.adj_close,
                })
                .collect(),
        ),
    }
}

/// Project the series restricted to the user-visible window, stripping
/// rows dated before `visible_start`.
pub fn project_from(
    series: &CanonicalSeries,
    kind: ChartKind,
    visible_start: TradingDate,
) -> ChartProjection {
    match project(series, kind) {
        ChartProjection::Price(points) => ChartProjection::Price(
            points
                .into_iter()
                .filter(|point| point.date >= visible_start)
                .collect(),
        ),
        ChartProjection::Candles(points) => ChartProjection::Candles(
            points
                .into_iter()
                .filter(|point| point.date >= visible_start)
                .collect(),
        ),
    }
}
