//! Series normalization: heterogeneous upstream tables in, one canonical
//! schema out.

use crate::raw::RawTable;
use crate::{AnalyticsError, CanonicalSeries, PriceRow, Symbol, TradingDate, ValidationError};

/// Extra leading history fetched so indicators are defined at the start of
/// the user-visible range. Matches the RSI window.
pub const WARM_UP_DAYS: u16 = 14;

const FIELD_OPEN: &str = "Open";
const FIELD_HIGH: &str = "High";
const FIELD_LOW: &str = "Low";
const FIELD_CLOSE: &str = "Close";
const FIELD_ADJ_CLOSE: &str = "AdjClose";
const FIELD_VOLUME: &str = "Volume";

/// Window actually requested from upstream for a user-visible
/// `[start, end]` range: the start is pushed back by [`WARM_UP_DAYS`] so
/// trailing-window indicators are defined on the first visible day.
/// Whether the prefix is displayed is the chart layer's decision.
pub fn fetch_window(
    start: TradingDate,
    end: TradingDate,
) -> Result<(TradingDate, TradingDate), ValidationError> {
    let extended_start = start.checked_sub_days(WARM_UP_DAYS)?;
    Ok((extended_start, end))
}

/// Canonicalize a raw price table of unspecified column shape.
///
/// Compound column labels are flattened to their base field name, the
/// timestamp axis is materialized into a parsed date field, and a missing
/// adjusted close is synthesized as a copy of close. Rows come out sorted
/// ascending by date; a duplicated date keeps its last occurrence (a
/// refreshed upstream row supersedes the earlier one).
pub fn normalize(symbol: &Symbol, table: &RawTable) -> Result<CanonicalSeries, AnalyticsError> {
    let row_count = table.row_count();
    if row_count == 0 {
        return Err(AnalyticsError::EmptySeries {
            symbol: symbol.to_string(),
        });
    }

    let open = require_column(table, FIELD_OPEN, row_count)?;
    let high = require_column(table, FIELD_HIGH, row_count)?;
    let low = require_column(table, FIELD_LOW, row_count)?;
    let close = require_column(table, FIELD_CLOSE, row_count)?;
    let volume = require_column(table, FIELD_VOLUME, row_count)?;

    // Some sources drop the adjusted close for certain tickers; the rest of
    // the pipeline is defined against it, so default it to close.
    let adj_close = match find_column(table, FIELD_ADJ_CLOSE) {
        Some(values) => {
            check_length(FIELD_ADJ_CLOSE, values, row_count)?;
            values
        }
        None => close,
    };

    let mut rows = Vec::with_capacity(row_count);
    for index in 0..row_count {
        let raw_date = &table.timestamps.values()[index];
        let date = TradingDate::parse(raw_date).map_err(|source| AnalyticsError::InvalidRow {
            date: raw_date.clone(),
            source,
        })?;

        let row = PriceRow::new(
            date,
            open[index],
            high[index],
            low[index],
            close[index],
            adj_close[index],
            volume[index],
        )
        .map_err(|source| AnalyticsError::InvalidRow {
            date: date.format_iso8601(),
            source,
        })?;
        rows.push(row);
    }

    rows.sort_by_key(|row| row.date);
    dedupe_keep_last(&mut rows);

    CanonicalSeries::new(symbol.clone(), rows).map_err(|source| AnalyticsError::InvalidRow {
        date: String::new(),
        source,
    })
}

fn find_column<'a>(table: &'a RawTable, field: &str) -> Option<&'a [f64]> {
    table
        .columns
        .iter()
        .find(|column| field_key(column.label.base()) == field_key(field))
        .map(|column| column.values.as_slice())
}

fn require_column<'a>(
    table: &'a RawTable,
    field: &'static str,
    row_count: usize,
) -> Result<&'a [f64], AnalyticsError> {
    let values =
        find_column(table, field).ok_or(AnalyticsError::MissingRequiredField { field })?;
    check_length(field, values, row_count)?;
    Ok(values)
}

fn check_length(
    field: &'static str,
    values: &[f64],
    row_count: usize,
) -> Result<(), AnalyticsError> {
    // A ragged column has absent cells, which is a missing field for the
    // affected rows.
    if values.len() != row_count {
        return Err(AnalyticsError::MissingRequiredField { field });
    }
    Ok(())
}

/// Case- and separator-insensitive field key: "Adj Close", "adj_close" and
/// "AdjustedClose" all map to the adjusted-close column.
fn field_key(label: &str) -> String {
    let folded = label
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .collect::<String>()
        .to_ascii_lowercase();

    match folded.as_str() {
        "adjclose" | "adjustedclose" => String::from("adjclose"),
        other => other.to_owned(),
    }
}

fn dedupe_keep_last(rows: &mut Vec<PriceRow>) {
    let mut deduped: Vec<PriceRow> = Vec::with_capacity(rows.len());
    for row in rows.drain(..) {
        match deduped.last() {
            Some(last) if last.date == row.date => {
                *deduped
                    .last_mut()
                    .expect("non-empty after matching on last") = row;
            }
            _ => deduped.push(row),
        }
    }
    *rows = deduped;
}
