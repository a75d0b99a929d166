use core::fmt;

use crate::TrendSummary;

/// Per-run trade bookkeeping rendered as a single log line.
///
/// Columns are separated by `" | "` with exactly one space on either side.
/// `pf_delta` is printed with six decimals and the probability-like fields
/// (`ppt`, `avg_ppt`, `ppe`) with fifteen.
///
/// # Examples
///
/// ```
/// use ta_trend::TradeMetrics;
///
/// let line = TradeMetrics {
///     trades: 1348,
///     pf_delta: 0.000572,
///     models: 32,
///     model_trades: 28,
///     ppt: 0.0,
///     avg_ppt: 0.0,
///     ppe: 0.0,
/// }
/// .to_string();
///
/// assert_eq!(
///     line,
///     "trades: 1348 | pf_delta: 0.000572 | models: 32 | model_trades: 28 | \
///      ppt: 0.000000000000000 | avg_ppt: 0.000000000000000 | ppe: 0.000000000000000"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TradeMetrics {
    /// Number of trades
    pub trades: u64,
    /// Profit factor change
    pub pf_delta: f64,
    /// Number of models
    pub models: u64,
    /// Trades placed by models
    pub model_trades: u64,
    /// `ppt` probability
    pub ppt: f64,
    /// Running average of `ppt`
    pub avg_ppt: f64,
    /// `ppe` probability
    pub ppe: f64,
}

impl fmt::Display for TradeMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trades: {} | pf_delta: {:.6} | models: {} | model_trades: {} | ppt: {:.15} | avg_ppt: {:.15} | ppe: {:.15}",
            self.trades,
            self.pf_delta,
            self.models,
            self.model_trades,
            self.ppt,
            self.avg_ppt,
            self.ppe
        )
    }
}

// Same column layout as trade metrics: estimates at 6 decimals, probabilities at 15
impl fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.current_interval();
        write!(
            f,
            "current: {:.6} | ci: [{:.6}, {:.6}] | p_slope_positive: {:.15} | p_above_zero_future: {:.15}",
            self.current_estimate(),
            low,
            high,
            self.probability_slope_positive(),
            self.probability_future_above_zero()
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::{TrendConfig, summarize};

    #[test]
    fn trade_metrics_precision_and_spacing() {
        let line = TradeMetrics {
            trades: 1348,
            pf_delta: 0.000572,
            models: 32,
            model_trades: 28,
            ppt: 0.0,
            avg_ppt: 0.0,
            ppe: 0.0,
        }
        .to_string();

        assert!(!line.contains("  "));
        for column in line.split(" | ") {
            let Some((name, value)) = column.split_once(": ") else {
                panic!("malformed column {column}");
            };
            if matches!(name, "ppt" | "avg_ppt" | "ppe") {
                let decimals = value.split_once('.').map(|(_, d)| d.len());
                assert_eq!(decimals, Some(15), "{name}");
            }
        }
        assert_eq!(
            line,
            "trades: 1348 | pf_delta: 0.000572 | models: 32 | model_trades: 28 | \
             ppt: 0.000000000000000 | avg_ppt: 0.000000000000000 | ppe: 0.000000000000000"
        );
    }

    #[test]
    fn trade_metrics_rounds_probabilities() {
        let line = TradeMetrics {
            ppt: 0.123_456_789_012_345_67,
            ..Default::default()
        }
        .to_string();
        assert!(line.contains("| ppt: 0.123456789012346 |"));
        assert!(line.starts_with("trades: 0 | pf_delta: 0.000000 |"));
    }

    #[test]
    fn trend_summary_line() {
        let Ok(summary) = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0], &TrendConfig::new(1, 0.95)) else {
            panic!("summary failed");
        };
        assert_eq!(
            summary.to_string(),
            "current: 5.000000 | ci: [5.000000, 5.000000] | \
             p_slope_positive: 1.000000000000000 | p_above_zero_future: 1.000000000000000"
        );
    }
}
