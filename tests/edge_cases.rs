//! Edge cases across normalization, filtering, and projections.

use marketpulse_core::{
    current_snapshot, moving_average, normalize, project, project_from, relevant_news,
    CanonicalSeries, ChartKind, NewsFeed, NewsItem, RawColumn, RawTable, TimestampAxis,
};
use marketpulse_tests::{date, raw_table_from_closes, series_from_closes, symbol};

// ============================================================================
// Normalizer
// ============================================================================

#[test]
fn single_row_table_normalizes() {
    let table = raw_table_from_closes(&[10.0]);
    let series = normalize(&symbol("TSLA"), &table).expect("normalizes");
    assert_eq!(series.len(), 1);
}

#[test]
fn unordered_input_comes_out_sorted() {
    let mut table = raw_table_from_closes(&[10.0, 11.0, 12.0]);
    let TimestampAxis::Column(dates) = &mut table.timestamps else {
        panic!("column axis expected");
    };
    dates.swap(0, 2);

    let series = normalize(&symbol("TSLA"), &table).expect("normalizes");
    let out: Vec<String> = series.dates().map(|day| day.format_iso8601()).collect();
    assert_eq!(out, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
}

#[test]
fn duplicate_date_keeps_the_last_occurrence() {
    let table = RawTable::new(
        TimestampAxis::Index(vec![
            String::from("2024-01-01"),
            String::from("2024-01-01"),
        ]),
        vec![
            RawColumn::flat("Open", vec![10.0, 20.0]),
            RawColumn::flat("High", vec![12.0, 22.0]),
            RawColumn::flat("Low", vec![8.0, 18.0]),
            RawColumn::flat("Close", vec![11.0, 21.0]),
            RawColumn::flat("Volume", vec![100.0, 200.0]),
        ],
    );

    let series = normalize(&symbol("TSLA"), &table).expect("normalizes");
    assert_eq!(series.len(), 1);
    assert!((series.rows()[0].close - 21.0).abs() < f64::EPSILON);
}

#[test]
fn timestamp_with_time_suffix_is_accepted() {
    let mut table = raw_table_from_closes(&[10.0]);
    table.timestamps = TimestampAxis::Index(vec![String::from("2024-01-01 00:00:00")]);

    let series = normalize(&symbol("TSLA"), &table).expect("normalizes");
    assert_eq!(series.rows()[0].date.format_iso8601(), "2024-01-01");
}

// ============================================================================
// Indicators on degenerate series
// ============================================================================

#[test]
fn window_larger_than_series_is_all_undefined() {
    let series = series_from_closes("TSLA", &[1.0, 2.0, 3.0]);
    assert!(moving_average(&series, 10).iter().all(Option::is_none));
}

#[test]
fn snapshot_on_single_row_has_undefined_averages() {
    let series = series_from_closes("TSLA", &[10.0]);
    let snapshot = current_snapshot(&series).expect("snapshot");
    assert_eq!(snapshot.latest_close, 10.0);
    assert_eq!(snapshot.ma_short, None);
    assert_eq!(snapshot.ma_long, None);
}

// ============================================================================
// News relevance fallback
// ============================================================================

#[test]
fn empty_feed_stays_empty_through_the_filter() {
    let filtered = relevant_news(&NewsFeed::default(), &symbol("TSLA"));
    assert!(filtered.is_empty());
}

#[test]
fn zero_matches_falls_back_to_the_whole_feed() {
    let feed = NewsFeed::new(vec![
        NewsItem::new("Fed holds rates", "2024-11-20", "No change.", None),
        NewsItem::new("Oil slides", "2024-11-19", "Supply glut.", None),
    ]);

    let filtered = relevant_news(&feed, &symbol("TSLA"));
    assert_eq!(filtered, feed);
}

#[test]
fn ticker_match_is_case_insensitive_and_order_preserving() {
    let feed = NewsFeed::new(vec![
        NewsItem::new("tsla rallies", "2024-11-20", "Up 4%.", None),
        NewsItem::new("Unrelated", "2024-11-19", "Nothing here.", None),
        NewsItem::new("More on TSLA", "2024-11-18", "Analyst note.", None),
    ]);

    let filtered = relevant_news(&feed, &symbol("TSLA"));
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.items[0].title, "tsla rallies");
    assert_eq!(filtered.items[1].title, "More on TSLA");
}

// ============================================================================
// Chart trimming
// ============================================================================

#[test]
fn trim_past_the_end_yields_an_empty_projection() {
    let series = series_from_closes("TSLA", &[1.0, 2.0, 3.0]);
    let projection = project_from(&series, ChartKind::Line, date("2025-01-01"));
    assert!(projection.is_empty());
}

#[test]
fn projection_of_empty_series_is_empty_not_an_error() {
    let series = CanonicalSeries::new(symbol("TSLA"), Vec::new()).expect("empty series");
    let projection = project(&series, ChartKind::Candlestick);
    assert!(projection.is_empty());
}

#[test]
fn projection_length_never_exceeds_input_length() {
    let series = series_from_closes("TSLA", &[1.0, 2.0, 3.0, 4.0]);
    let full = project(&series, ChartKind::Bar);
    let trimmed = project_from(&series, ChartKind::Bar, date("2024-01-03"));

    assert_eq!(full.len(), series.len());
    assert!(trimmed.len() <= full.len());
    assert_eq!(trimmed.len(), 2);
}
