use marketpulse_core::{
    analyze, fetch_window, AnalysisRequest, AnalyticsError, ChartKind, EnvelopeError,
    HistoryRequest, PriceHistorySource, SampleHistorySource, Symbol, TableShape, TradingDate,
};
use serde_json::json;

use crate::cli::{AnalyzeArgs, ChartSelector, ShapeSelector};
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &AnalyzeArgs) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.ticker)?;
    let start = TradingDate::parse(&args.start)?;
    let end = TradingDate::parse(&args.end)?;
    let chart = to_chart_kind(args.chart);
    let request = AnalysisRequest::new(symbol.clone(), start, end, chart)?;

    let (extended_start, fetch_end) = fetch_window(start, end)?;
    let history_request = HistoryRequest::new(symbol, extended_start, fetch_end)?;
    let source = SampleHistorySource::with_shape(to_table_shape(args.shape));
    let table = source
        .history(&history_request)
        .map_err(|error| CliError::Command(error.to_string()))?;

    match analyze(&request, &table) {
        Ok(report) => {
            let panel_errors = report
                .panel_errors
                .iter()
                .map(|panel| {
                    EnvelopeError::new(panel.code.clone(), format!("{}: {}", panel.panel, panel.message))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let data = serde_json::to_value(&report)?;
            Ok(CommandResult::ok(data).with_errors(panel_errors))
        }
        // "No data" is a reported condition, not a crash.
        Err(error @ AnalyticsError::EmptySeries { .. }) => Ok(CommandResult::ok(json!(null))
            .with_errors(vec![EnvelopeError::from_analytics(&error)])
            .with_warning("no data available for the selected ticker and date range")),
        // Fatal: upstream shape changed, the normalizer must be updated.
        Err(error) => Err(CliError::from(error)),
    }
}

fn to_chart_kind(selector: ChartSelector) -> ChartKind {
    match selector {
        ChartSelector::Line => ChartKind::Line,
        ChartSelector::Bar => ChartKind::Bar,
        ChartSelector::Candlestick => ChartKind::Candlestick,
    }
}

fn to_table_shape(selector: ShapeSelector) -> TableShape {
    match selector {
        ShapeSelector::Flat => TableShape::Flat,
        ShapeSelector::CompoundLabels => TableShape::CompoundLabels,
        ShapeSelector::IndexedDates => TableShape::IndexedDates,
        ShapeSelector::NoAdjustedClose => TableShape::NoAdjustedClose,
    }
}
