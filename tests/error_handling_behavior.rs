//! Error taxonomy behavior: fatal conditions abort, non-fatal conditions
//! degrade a single panel, and every typed failure maps to a stable code.

use marketpulse_core::{
    analyze, normalize, AnalysisRequest, AnalyticsError, ChartKind, Envelope, EnvelopeError,
    EnvelopeMeta, RawColumn, RawTable, SourceError, SourceErrorKind, Symbol, TimestampAxis,
    ValidationError,
};
use marketpulse_relay::{CannedTransport, ChatConfig, ChatHistory, ChatRelay, RelayError};
use marketpulse_tests::{date, raw_table_from_closes, symbol};

fn request() -> AnalysisRequest {
    AnalysisRequest::new(
        symbol("TSLA"),
        date("2024-01-01"),
        date("2024-01-31"),
        ChartKind::Line,
    )
    .expect("valid request")
}

// ============================================================================
// Fatal conditions abort the whole report
// ============================================================================

#[test]
fn empty_table_aborts_as_empty_series_not_a_panel_error() {
    let table = RawTable::new(TimestampAxis::Index(Vec::new()), Vec::new());

    let err = analyze(&request(), &table).expect_err("must fail");
    assert!(matches!(err, AnalyticsError::EmptySeries { .. }));
    assert_eq!(err.code(), "analytics.empty_series");
    assert!(!err.is_fatal(), "empty series is reported, not crashed on");
}

#[test]
fn dropped_close_column_is_a_fatal_missing_field() {
    let mut table = raw_table_from_closes(&[10.0, 11.0]);
    table
        .columns
        .retain(|column| column.label.base() != "Close");

    let err = analyze(&request(), &table).expect_err("must fail");
    assert!(matches!(
        err,
        AnalyticsError::MissingRequiredField { field: "Close" }
    ));
    assert!(err.is_fatal());
}

#[test]
fn negative_price_cell_is_a_fatal_invalid_row() {
    let mut table = raw_table_from_closes(&[10.0, 11.0]);
    table.columns[3].values[1] = -1.0;

    let err = analyze(&request(), &table).expect_err("must fail");
    let AnalyticsError::InvalidRow { date, source } = &err else {
        panic!("invalid row expected, got {err:?}");
    };
    assert_eq!(date, "2024-01-02");
    assert!(matches!(source, ValidationError::NegativeValue { .. }));
    assert!(err.is_fatal());
}

#[test]
fn unparseable_timestamp_is_a_fatal_invalid_row() {
    let mut table = raw_table_from_closes(&[10.0]);
    table.timestamps = TimestampAxis::Column(vec![String::from("yesterday")]);

    let err = normalize(&symbol("TSLA"), &table).expect_err("must fail");
    assert!(matches!(err, AnalyticsError::InvalidRow { .. }));
    assert_eq!(err.code(), "analytics.invalid_row");
}

// ============================================================================
// Non-fatal conditions degrade one panel
// ============================================================================

#[test]
fn short_history_keeps_the_report_and_marks_only_the_rsi_panel() {
    let table = raw_table_from_closes(&[10.0, 11.0, 12.0]);

    let report = analyze(&request(), &table).expect("report survives");
    assert_eq!(report.panel_errors.len(), 1);
    assert_eq!(report.panel_errors[0].panel, "rsi");
    assert_eq!(report.panel_errors[0].code, "analytics.insufficient_history");
    assert!(report.snapshot.is_some());
    assert!(!report.chart.is_empty());
}

// ============================================================================
// Envelope mapping
// ============================================================================

#[test]
fn every_analytics_error_maps_to_a_distinct_stable_code() {
    let errors = [
        AnalyticsError::EmptySeries {
            symbol: String::from("TSLA"),
        },
        AnalyticsError::MissingRequiredField { field: "Close" },
        AnalyticsError::InsufficientHistory {
            needed: 15,
            have: 3,
        },
        AnalyticsError::UndefinedIndicator,
        AnalyticsError::InvalidRow {
            date: String::from("2024-01-01"),
            source: ValidationError::InvalidRowRange,
        },
    ];

    let codes: Vec<&str> = errors.iter().map(AnalyticsError::code).collect();
    let mut deduped = codes.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(codes.len(), deduped.len(), "codes must not collide");
    assert!(codes.iter().all(|code| code.starts_with("analytics.")));
}

#[test]
fn envelope_error_carries_code_message_and_non_retryable_flag() {
    let error = EnvelopeError::from_analytics(&AnalyticsError::InsufficientHistory {
        needed: 15,
        have: 3,
    });

    assert_eq!(error.code, "analytics.insufficient_history");
    assert!(error.message.contains("need 15 rows"));
    assert_eq!(error.retryable, Some(false));
}

#[test]
fn partial_envelope_serializes_errors_alongside_data() {
    let meta = EnvelopeMeta::new("req-7c1b9f20", "2024-11-23T00:00:00Z").expect("meta");
    let envelope = Envelope::with_errors(
        meta,
        serde_json::json!({"symbol": "TSLA"}),
        vec![EnvelopeError::from_analytics(
            &AnalyticsError::UndefinedIndicator,
        )],
    )
    .expect("envelope");

    let encoded = serde_json::to_value(&envelope).expect("serializes");
    assert_eq!(encoded["meta"]["request_id"], "req-7c1b9f20");
    assert_eq!(encoded["errors"][0]["code"], "analytics.undefined_indicator");
    assert_eq!(encoded["errors"][0]["retryable"], false);
}

#[test]
fn envelope_rejects_blank_error_entries() {
    let meta = EnvelopeMeta::new("req-7c1b9f20", "2024-11-23T00:00:00Z").expect("meta");
    let blank = EnvelopeError {
        code: String::from("  "),
        message: String::from("message"),
        retryable: None,
    };

    let err = Envelope::with_errors(meta, (), vec![blank]).expect_err("must fail");
    assert!(matches!(err, ValidationError::EmptyErrorCode));
}

// ============================================================================
// Source errors
// ============================================================================

#[test]
fn source_error_retryability_follows_its_kind() {
    let unavailable = SourceError::unavailable("upstream down");
    assert_eq!(unavailable.kind(), SourceErrorKind::Unavailable);
    assert!(unavailable.retryable());
    assert_eq!(unavailable.code(), "source.unavailable");

    let invalid = SourceError::invalid_request("bad window");
    assert!(!invalid.retryable());
    assert_eq!(invalid.code(), "source.invalid_request");
}

// ============================================================================
// Relay errors
// ============================================================================

fn relay_config() -> ChatConfig {
    ChatConfig::new(
        "https://api.example.test/v1/chat/completions",
        "demo-model",
        "key-123",
    )
    .expect("config")
}

#[tokio::test]
async fn relay_rejects_whitespace_prompt_before_any_network_call() {
    let transport = CannedTransport::replying(200, "{}");
    let relay = ChatRelay::new(relay_config(), transport);

    let err = relay
        .send(ChatHistory::new(), "  \t ")
        .await
        .expect_err("must fail");
    assert!(matches!(err, RelayError::EmptyPrompt));
}

#[tokio::test]
async fn relay_surfaces_non_success_status_with_its_code() {
    let relay = ChatRelay::new(relay_config(), CannedTransport::replying(503, "{}"));

    let err = relay
        .send(ChatHistory::new(), "question")
        .await
        .expect_err("must fail");
    assert!(matches!(err, RelayError::Status { code: 503 }));
}

#[tokio::test]
async fn relay_treats_reply_without_choices_as_malformed() {
    let relay = ChatRelay::new(
        relay_config(),
        CannedTransport::replying(200, r#"{"choices": []}"#),
    );

    let err = relay
        .send(ChatHistory::new(), "question")
        .await
        .expect_err("must fail");
    assert!(matches!(err, RelayError::MalformedResponse));
}

// ============================================================================
// Request validation
// ============================================================================

#[test]
fn inverted_analysis_window_is_rejected() {
    let err = AnalysisRequest::new(
        symbol("TSLA"),
        date("2024-02-01"),
        date("2024-01-01"),
        ChartKind::Line,
    )
    .expect_err("must fail");
    assert!(matches!(err, ValidationError::InvalidWindow { .. }));
}

#[test]
fn malformed_ticker_is_rejected_with_a_specific_variant() {
    assert!(matches!(
        Symbol::parse(""),
        Err(ValidationError::EmptySymbol)
    ));
    assert!(matches!(
        Symbol::parse("WAYTOOLONGTICKER"),
        Err(ValidationError::SymbolTooLong { .. })
    ));
    assert!(matches!(
        Symbol::parse("TS LA"),
        Err(ValidationError::SymbolInvalidChar { .. })
    ));
}
