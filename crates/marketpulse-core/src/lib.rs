//! Core analytics for marketpulse.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Series normalization from heterogeneous upstream table shapes
//! - Technical indicators (moving averages, RSI) and sentiment tiers
//! - News relevance filtering and chart projections
//! - Response envelope and structured errors

pub mod adapters;
pub mod chart;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod indicators;
pub mod news;
pub mod normalize;
pub mod pipeline;
pub mod raw;
pub mod sentiment;
pub mod source;

pub use adapters::{SampleHistorySource, SampleNewsSource, TableShape};
pub use chart::{project, project_from, CandlePoint, ChartKind, ChartProjection, PricePoint};
pub use domain::{CanonicalSeries, PriceRow, Symbol, TradingDate};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{AnalyticsError, CoreError, ValidationError};
pub use indicators::{
    current_snapshot, has_rsi_history, moving_average, rsi, IndicatorSnapshot, LONG_MA_WINDOW,
    RSI_WINDOW, SHORT_MA_WINDOW,
};
pub use news::{relevant_news, NewsFeed, NewsItem};
pub use normalize::{fetch_window, normalize, WARM_UP_DAYS};
pub use pipeline::{analyze, AnalysisReport, AnalysisRequest, PanelError};
pub use raw::{ColumnLabel, RawColumn, RawTable, TimestampAxis};
pub use sentiment::{classify, classify_defined, indicator_asset, SentimentTier};
pub use source::{HistoryRequest, NewsSource, PriceHistorySource, SourceError, SourceErrorKind};
