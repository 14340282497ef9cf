//! RSI sentiment tiers for the dashboard indicator panel.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// Discrete sentiment bucket derived from RSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTier {
    /// RSI < 30: bullish-reversal signal.
    Oversold,
    /// 30 <= RSI < 40.
    MildlyOversold,
    /// 40 <= RSI < 60.
    Neutral,
    /// 60 <= RSI < 70.
    MildlyOverbought,
    /// RSI >= 70: bearish-reversal signal.
    Overbought,
}

impl SentimentTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oversold => "oversold",
            Self::MildlyOversold => "mildly_oversold",
            Self::Neutral => "neutral",
            Self::MildlyOverbought => "mildly_overbought",
            Self::Overbought => "overbought",
        }
    }
}

impl Display for SentimentTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a defined RSI value to its tier. Buckets are half-open with an
/// inclusive lower bound.
pub fn classify(rsi: f64) -> SentimentTier {
    if rsi < 30.0 {
        SentimentTier::Oversold
    } else if rsi < 40.0 {
        SentimentTier::MildlyOversold
    } else if rsi < 60.0 {
        SentimentTier::Neutral
    } else if rsi < 70.0 {
        SentimentTier::MildlyOverbought
    } else {
        SentimentTier::Overbought
    }
}

/// Classify an RSI that may be undefined. An undefined indicator is a
/// typed failure, never a silent "neutral".
pub fn classify_defined(rsi: Option<f64>) -> Result<SentimentTier, AnalyticsError> {
    rsi.map(classify).ok_or(AnalyticsError::UndefinedIndicator)
}

/// Static indicator image asset keyed by tier.
pub const fn indicator_asset(tier: SentimentTier) -> &'static str {
    match tier {
        SentimentTier::Oversold => "GREEN.png",
        SentimentTier::MildlyOversold => "LIGHTGREEN.png",
        SentimentTier::Neutral => "YELLOW.png",
        SentimentTier::MildlyOverbought => "ORANGE.png",
        SentimentTier::Overbought => "RED.png",
    }
}
