//! One full analytics pass: normalize, derive indicators, classify,
//! project.
//!
//! Failures are isolated per panel: a fatal normalization error aborts the
//! report, but an undefined RSI or short history only marks its own panel
//! while the chart and snapshot still render.

use serde::{Deserialize, Serialize};

use crate::chart::{project_from, ChartKind, ChartProjection};
use crate::indicators::{
    current_snapshot, has_rsi_history, moving_average, rsi, IndicatorSnapshot, LONG_MA_WINDOW,
    RSI_WINDOW, SHORT_MA_WINDOW,
};
use crate::raw::RawTable;
use crate::sentiment::{classify_defined, indicator_asset, SentimentTier};
use crate::{normalize, AnalyticsError, CanonicalSeries, Symbol, TradingDate, ValidationError};

/// One user interaction's worth of pipeline input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: Symbol,
    pub start: TradingDate,
    pub end: TradingDate,
    pub chart: ChartKind,
}

impl AnalysisRequest {
    pub fn new(
        symbol: Symbol,
        start: TradingDate,
        end: TradingDate,
        chart: ChartKind,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidWindow {
                start: start.format_iso8601(),
                end: end.format_iso8601(),
            });
        }
        Ok(Self {
            symbol,
            start,
            end,
            chart,
        })
    }
}

/// Non-fatal failure of one report panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelError {
    pub panel: String,
    pub code: String,
    pub message: String,
}

impl PanelError {
    fn new(panel: &str, error: &AnalyticsError) -> Self {
        Self {
            panel: panel.to_owned(),
            code: error.code().to_owned(),
            message: error.to_string(),
        }
    }
}

/// Chart-ready, indicator-annotated result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub visible_start: TradingDate,
    pub end: TradingDate,
    pub series: CanonicalSeries,
    pub snapshot: Option<IndicatorSnapshot>,
    pub latest_rsi: Option<f64>,
    pub sentiment: Option<SentimentTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_asset: Option<String>,
    pub chart: ChartProjection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub panel_errors: Vec<PanelError>,
}

/// Run the full pass over an already-fetched raw table.
///
/// The table is expected to cover the warm-up-extended window from
/// [`crate::fetch_window`]; the chart projection is trimmed back to the
/// user-visible range. Fatal conditions (`EmptySeries`,
/// `MissingRequiredField`, `InvalidRow`) return `Err`; everything else is
/// recorded per panel.
pub fn analyze(req: &AnalysisRequest, table: &RawTable) -> Result<AnalysisReport, AnalyticsError> {
    let mut series = normalize(&req.symbol, table)?;
    let mut panel_errors = Vec::new();

    let ma_short = moving_average(&series, SHORT_MA_WINDOW);
    let ma_long = moving_average(&series, LONG_MA_WINDOW);

    // Strict RSI contract: the length check happens here, before the
    // computation is attempted.
    let (latest_rsi, rsi_column) = if has_rsi_history(&series, RSI_WINDOW) {
        let column = rsi(&series, RSI_WINDOW);
        (column.last().copied().flatten(), column)
    } else {
        panel_errors.push(PanelError::new(
            "rsi",
            &AnalyticsError::InsufficientHistory {
                needed: RSI_WINDOW + 1,
                have: series.len(),
            },
        ));
        (None, vec![None; series.len()])
    };

    attach(&mut series, "ma_50", ma_short);
    attach(&mut series, "ma_200", ma_long);
    attach(&mut series, "rsi", rsi_column);

    let snapshot = match current_snapshot(&series) {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            panel_errors.push(PanelError::new("snapshot", &error));
            None
        }
    };

    let sentiment = if panel_errors.iter().any(|panel| panel.panel == "rsi") {
        // The RSI panel already failed; classifying would only duplicate
        // the condition.
        None
    } else {
        match classify_defined(latest_rsi) {
            Ok(tier) => Some(tier),
            Err(error) => {
                panel_errors.push(PanelError::new("sentiment", &error));
                None
            }
        }
    };

    let chart = project_from(&series, req.chart, req.start);

    Ok(AnalysisReport {
        symbol: req.symbol.clone(),
        visible_start: req.start,
        end: req.end,
        snapshot,
        latest_rsi,
        sentiment,
        sentiment_asset: sentiment.map(|tier| indicator_asset(tier).to_owned()),
        chart,
        series,
        panel_errors,
    })
}

fn attach(series: &mut CanonicalSeries, name: &str, values: Vec<Option<f64>>) {
    series
        .attach_column(name, values)
        .expect("indicator columns align with series rows");
}
