//! Mathematical correctness of the indicator engine.
//!
//! Each test pins one property of the moving-average/RSI contract against
//! hand-computed values.

use marketpulse_core::{classify, moving_average, rsi, SentimentTier, RSI_WINDOW};
use marketpulse_tests::series_from_closes;

// ============================================================================
// Moving average
// ============================================================================

#[test]
fn moving_average_is_defined_exactly_from_window_minus_one() {
    let closes: Vec<f64> = (1..=10).map(f64::from).collect();
    let series = series_from_closes("TSLA", &closes);

    for window in [1_usize, 3, 5, 10] {
        let averages = moving_average(&series, window);
        for (index, value) in averages.iter().enumerate() {
            assert_eq!(
                value.is_some(),
                index >= window - 1,
                "window {window}, index {index}"
            );
        }
    }
}

#[test]
fn moving_average_equals_trailing_mean() {
    let closes = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
    let series = series_from_closes("TSLA", &closes);

    let averages = moving_average(&series, 3);
    for index in 2..closes.len() {
        let expected = (closes[index] + closes[index - 1] + closes[index - 2]) / 3.0;
        let got = averages[index].expect("defined");
        assert!((got - expected).abs() < 1e-12, "index {index}: {got}");
    }
}

#[test]
fn moving_average_window_one_is_the_series_itself() {
    let closes = [3.5, 7.25, 1.0];
    let series = series_from_closes("TSLA", &closes);

    let averages = moving_average(&series, 1);
    for (index, close) in closes.iter().enumerate() {
        assert_eq!(averages[index], Some(*close));
    }
}

#[test]
fn moving_average_never_reads_forward() {
    // Two series that agree on a prefix must produce identical averages
    // over that prefix regardless of what follows.
    let shared = [10.0, 11.0, 12.0, 13.0];
    let rising = series_from_closes("TSLA", &[10.0, 11.0, 12.0, 13.0, 99.0]);
    let falling = series_from_closes("TSLA", &[10.0, 11.0, 12.0, 13.0, 1.0]);

    let rising_ma = moving_average(&rising, 2);
    let falling_ma = moving_average(&falling, 2);
    for index in 0..shared.len() {
        assert_eq!(rising_ma[index], falling_ma[index], "index {index}");
    }
}

// ============================================================================
// RSI
// ============================================================================

#[test]
fn rsi_is_bounded_whenever_defined() {
    let closes: Vec<f64> = (0..60)
        .map(|index| 100.0 + f64::from((index * 11) % 17) - 8.0)
        .collect();
    let series = series_from_closes("TSLA", &closes);

    for value in rsi(&series, RSI_WINDOW).into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value), "out of bounds: {value}");
    }
}

#[test]
fn rsi_saturates_at_100_exactly_when_losses_are_zero() {
    // Monotonically increasing 20-row series: every trailing window after
    // warm-up has zero losses and positive gains.
    let closes: Vec<f64> = (1..=20).map(f64::from).collect();
    let series = series_from_closes("TSLA", &closes);

    let values = rsi(&series, RSI_WINDOW);
    for index in RSI_WINDOW..values.len() {
        assert_eq!(values[index], Some(100.0), "index {index}");
    }
}

#[test]
fn rsi_is_undefined_before_window_deltas_exist() {
    let closes: Vec<f64> = (1..=20).map(f64::from).collect();
    let series = series_from_closes("TSLA", &closes);

    let values = rsi(&series, RSI_WINDOW);
    for index in 0..RSI_WINDOW {
        assert_eq!(values[index], None, "index {index}");
    }
}

#[test]
fn rsi_on_flat_window_is_undefined_not_fifty() {
    let series = series_from_closes("TSLA", &[42.0; 30]);
    let values = rsi(&series, RSI_WINDOW);
    assert!(values.iter().all(Option::is_none));
}

#[test]
fn rsi_matches_hand_computed_mixed_window() {
    // Window 3 over deltas [+2, +2, -2]: avg gain 4/3, avg loss 2/3,
    // RS = 2, RSI = 100 - 100/3.
    let series = series_from_closes("TSLA", &[10.0, 12.0, 14.0, 12.0]);
    let values = rsi(&series, 3);

    let expected = 100.0 - 100.0 / 3.0;
    let got = values[3].expect("defined");
    assert!((got - expected).abs() < 1e-9, "got {got}");
}

// ============================================================================
// Sentiment boundaries
// ============================================================================

#[test]
fn sentiment_boundaries_are_inclusive_lower_exclusive_upper() {
    assert_eq!(classify(29.999), SentimentTier::Oversold);
    assert_eq!(classify(30.0), SentimentTier::MildlyOversold);
    assert_eq!(classify(69.999), SentimentTier::MildlyOverbought);
    assert_eq!(classify(70.0), SentimentTier::Overbought);
}

#[test]
fn sentiment_extremes_classify() {
    assert_eq!(classify(0.0), SentimentTier::Oversold);
    assert_eq!(classify(100.0), SentimentTier::Overbought);
    assert_eq!(classify(50.0), SentimentTier::Neutral);
}
