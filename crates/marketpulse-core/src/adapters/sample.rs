use crate::raw::{ColumnLabel, RawColumn, RawTable, TimestampAxis};
use crate::source::{HistoryRequest, NewsSource, PriceHistorySource, SourceError};
use crate::{NewsFeed, NewsItem, Symbol, TradingDate};

/// Upstream table shape emitted by [`SampleHistorySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableShape {
    /// Flat labels, explicit Date column, adjusted close present.
    #[default]
    Flat,
    /// Ticker-qualified compound labels, as multi-symbol downloads emit.
    CompoundLabels,
    /// Timestamps carried as the frame index instead of a column.
    IndexedDates,
    /// Adjusted close column dropped, as some sources do per ticker.
    NoAdjustedClose,
}

/// Deterministic daily price history seeded by the symbol.
#[derive(Debug, Clone, Default)]
pub struct SampleHistorySource {
    shape: TableShape,
}

impl SampleHistorySource {
    pub fn with_shape(shape: TableShape) -> Self {
        Self { shape }
    }
}

impl PriceHistorySource for SampleHistorySource {
    fn history(&self, req: &HistoryRequest) -> Result<RawTable, SourceError> {
        let seed = symbol_seed(&req.symbol);
        let dates = calendar_days(req.start, req.end)?;
        let rows = dates.len();

        let mut open = Vec::with_capacity(rows);
        let mut high = Vec::with_capacity(rows);
        let mut low = Vec::with_capacity(rows);
        let mut close = Vec::with_capacity(rows);
        let mut adj_close = Vec::with_capacity(rows);
        let mut volume = Vec::with_capacity(rows);

        for index in 0..rows {
            let base = 90.0 + ((seed + index as u64) % 350) as f64 / 10.0;
            open.push(base);
            high.push(base + 1.20);
            low.push(base - 0.80);
            close.push(base + 0.30);
            adj_close.push(base + 0.15);
            volume.push(20_000.0 + (index as f64) * 25.0);
        }

        let date_strings: Vec<String> = dates
            .iter()
            .map(|date| date.format_iso8601())
            .collect();

        let label = |name: &str| match self.shape {
            TableShape::CompoundLabels => {
                ColumnLabel::Compound(vec![name.to_owned(), req.symbol.to_string()])
            }
            _ => ColumnLabel::Flat(name.to_owned()),
        };

        let mut columns = vec![
            RawColumn {
                label: label("Open"),
                values: open,
            },
            RawColumn {
                label: label("High"),
                values: high,
            },
            RawColumn {
                label: label("Low"),
                values: low,
            },
            RawColumn {
                label: label("Close"),
                values: close,
            },
            RawColumn {
                label: label("Volume"),
                values: volume,
            },
        ];
        if self.shape != TableShape::NoAdjustedClose {
            columns.insert(
                4,
                RawColumn {
                    label: label("Adj Close"),
                    values: adj_close,
                },
            );
        }

        let timestamps = match self.shape {
            TableShape::IndexedDates => TimestampAxis::Index(date_strings),
            _ => TimestampAxis::Column(date_strings),
        };

        Ok(RawTable::new(timestamps, columns))
    }
}

/// Deterministic headline feed; a fixed share of items mentions the
/// requested ticker.
#[derive(Debug, Clone, Default)]
pub struct SampleNewsSource;

impl NewsSource for SampleNewsSource {
    fn news(&self, symbol: &Symbol) -> Result<NewsFeed, SourceError> {
        let ticker = symbol.as_str();
        let items = vec![
            NewsItem::new(
                format!("{ticker} beats delivery estimates"),
                "2024-11-20",
                format!("{ticker} reported a record quarter, topping consensus."),
                Some(format!("https://news.example.test/{ticker}/deliveries")),
            ),
            NewsItem::new(
                "Fed leaves rates unchanged",
                "2024-11-19",
                "Policy makers held the target range steady.",
                None,
            ),
            NewsItem::new(
                format!("Analysts split on {ticker} valuation"),
                "2024-11-18",
                "Price targets diverge after the latest run-up.",
                None,
            ),
            NewsItem::new(
                "Oil slides on supply glut",
                "2024-11-17",
                "Crude futures fell for a third session.",
                None,
            ),
        ];

        Ok(NewsFeed::new(items))
    }
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

fn calendar_days(start: TradingDate, end: TradingDate) -> Result<Vec<TradingDate>, SourceError> {
    if end < start {
        return Err(SourceError::invalid_request(
            "history window end precedes start",
        ));
    }

    let mut dates = Vec::new();
    let mut current = start.into_inner();
    let last = end.into_inner();
    while current <= last {
        dates.push(TradingDate::from_date(current));
        current = current
            .next_day()
            .ok_or_else(|| SourceError::internal("date range exceeds calendar bounds"))?;
    }
    Ok(dates)
}
