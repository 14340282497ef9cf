//! Upstream data-source contracts.
//!
//! The analytics core itself never performs I/O; sources hand it
//! already-materialized tables and feeds. The deterministic sample
//! implementations live in [`crate::adapters`].

use std::fmt::{Display, Formatter};

use crate::raw::RawTable;
use crate::{NewsFeed, Symbol, TradingDate, ValidationError};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidRequest,
    Internal,
}

/// Structured source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request for historical daily prices over an inclusive date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub start: TradingDate,
    pub end: TradingDate,
}

impl HistoryRequest {
    pub fn new(
        symbol: Symbol,
        start: TradingDate,
        end: TradingDate,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidWindow {
                start: start.format_iso8601(),
                end: end.format_iso8601(),
            });
        }
        Ok(Self { symbol, start, end })
    }
}

/// Price-history provider contract.
pub trait PriceHistorySource: Send + Sync {
    fn history(&self, req: &HistoryRequest) -> Result<RawTable, SourceError>;
}

/// News-feed provider contract.
pub trait NewsSource: Send + Sync {
    fn news(&self, symbol: &Symbol) -> Result<NewsFeed, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_window() {
        let symbol = Symbol::parse("TSLA").expect("symbol");
        let start = TradingDate::parse("2024-02-01").expect("date");
        let end = TradingDate::parse("2024-01-01").expect("date");

        let err = HistoryRequest::new(symbol, start, end).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidWindow { .. }));
    }
}
