//! Trailing-window indicators over a canonical series.
//!
//! Every computation is strictly causal: a value at index `i` only reads
//! rows at or before `i`. Undefined values are `None` and propagate; the
//! minimum-length contract for RSI is the caller's check
//! ([`has_rsi_history`]), not enforced here.

use serde::{Deserialize, Serialize};

use crate::{AnalyticsError, CanonicalSeries};

/// Wilder RSI lookback, also the warm-up window length.
pub const RSI_WINDOW: usize = 14;
/// Short trend moving average.
pub const SHORT_MA_WINDOW: usize = 50;
/// Long trend moving average.
pub const LONG_MA_WINDOW: usize = 200;

/// Trailing arithmetic mean of adjusted close over `window` rows
/// (inclusive). `None` for indexes with fewer than `window` trailing rows.
pub fn moving_average(series: &CanonicalSeries, window: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = series.adj_closes().collect();
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return out;
    }

    let mut sum: f64 = closes[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for index in window..closes.len() {
        sum += closes[index] - closes[index - window];
        out[index] = Some(sum / window as f64);
    }
    out
}

/// Relative strength index over adjusted close.
///
/// Per-step delta gains/losses are averaged with a trailing simple mean
/// over `window` deltas. A window with zero average loss and positive
/// average gain saturates at exactly 100; a flat window (both averages
/// zero) is undefined. Defined only once `window` prior deltas exist.
pub fn rsi(series: &CanonicalSeries, window: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = series.adj_closes().collect();
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() <= window {
        return out;
    }

    let gains: Vec<f64> = closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .collect();
    let losses: Vec<f64> = closes
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).max(0.0))
        .collect();

    let mut gain_sum: f64 = gains[..window].iter().sum();
    let mut loss_sum: f64 = losses[..window].iter().sum();

    for index in window..closes.len() {
        out[index] = rsi_value(gain_sum / window as f64, loss_sum / window as f64);

        // Slide the delta window; deltas are offset by one from rows.
        if index < closes.len() - 1 {
            gain_sum += gains[index] - gains[index - window];
            loss_sum += losses[index] - losses[index - window];
        }
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 {
            // The gain/loss ratio is unbounded; the indicator saturates at
            // its ceiling.
            return Some(100.0);
        }
        // Flat window: undefined, callers must not plot or classify it.
        return None;
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Whether the series carries enough trailing history for a defined RSI.
///
/// Callers check this before invoking [`rsi`]; the computation itself only
/// propagates undefined values.
pub fn has_rsi_history(series: &CanonicalSeries, window: usize) -> bool {
    series.len() > window
}

/// Most-recent-row scalars for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub latest_close: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
}

/// Latest close plus the latest 50- and 200-period moving averages.
///
/// Fails only on an empty series; a series shorter than a window leaves
/// that average undefined rather than erroring.
pub fn current_snapshot(series: &CanonicalSeries) -> Result<IndicatorSnapshot, AnalyticsError> {
    let last = series.last().ok_or(AnalyticsError::InsufficientHistory {
        needed: 1,
        have: 0,
    })?;

    let ma_short = moving_average(series, SHORT_MA_WINDOW)
        .last()
        .copied()
        .flatten();
    let ma_long = moving_average(series, LONG_MA_WINDOW)
        .last()
        .copied()
        .flatten();

    Ok(IndicatorSnapshot {
        latest_close: last.close,
        ma_short,
        ma_long,
    })
}
