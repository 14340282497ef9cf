use thiserror::Error;

/// Validation and contract errors exposed by `marketpulse-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be ISO-8601 (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },
    #[error("date arithmetic out of range for '{value}'")]
    DateOutOfRange { value: String },

    #[error("invalid chart kind '{value}', expected one of line, bar, candlestick")]
    InvalidChartKind { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("row high must be >= low")]
    InvalidRowRange,
    #[error("row open/close must be within high/low range")]
    InvalidRowBounds,

    #[error("series dates must be strictly increasing: '{date}' repeats or regresses")]
    NonMonotonicSeries { date: String },
    #[error("derived column '{name}' has {len} values for {rows} rows")]
    DerivedColumnLength {
        name: String,
        len: usize,
        rows: usize,
    },
    #[error("derived column '{name}' is already attached")]
    DerivedColumnExists { name: String },

    #[error("window must be within [{start}, {end}]")]
    InvalidWindow { start: String, end: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Analytics failure taxonomy for the normalization/indicator pipeline.
///
/// These are typed conditions, never retried and never suppressed by the
/// core; the presentation layer decides how each one is surfaced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Upstream returned zero rows for the requested range. Non-fatal:
    /// caller shows "no data".
    #[error("no price data for '{symbol}' in the requested range")]
    EmptySeries { symbol: String },

    /// A required field is still absent after normalization. Should be
    /// unreachable given the defaulting rules; signals an upstream-shape
    /// change the normalizer must be updated for.
    #[error("required field '{field}' missing after normalization")]
    MissingRequiredField { field: &'static str },

    /// Fewer rows than an operation requires. Non-fatal: caller asks the
    /// user to widen the date range.
    #[error("insufficient history: need {needed} rows, have {have}")]
    InsufficientHistory { needed: usize, have: usize },

    /// RSI is undefined (flat window or too little trailing history).
    /// Non-fatal: the affected panel reports instead of defaulting.
    #[error("indicator is undefined for the current window")]
    UndefinedIndicator,

    /// A normalized row failed domain validation. Fatal like
    /// `MissingRequiredField`: the upstream shape changed.
    #[error("row at '{date}' failed validation: {source}")]
    InvalidRow {
        date: String,
        #[source]
        source: ValidationError,
    },
}

impl AnalyticsError {
    /// Stable machine-readable code used by envelope errors.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptySeries { .. } => "analytics.empty_series",
            Self::MissingRequiredField { .. } => "analytics.missing_required_field",
            Self::InsufficientHistory { .. } => "analytics.insufficient_history",
            Self::UndefinedIndicator => "analytics.undefined_indicator",
            Self::InvalidRow { .. } => "analytics.invalid_row",
        }
    }

    /// Fatal conditions abort the whole report; non-fatal ones are
    /// reported per panel.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::InvalidRow { .. }
        )
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
