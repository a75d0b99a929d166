use crate::{LinearFit, TrendConfig, TrendError, TrendSummary, utils::ObservationWindow};

/// Trend summaries over a rolling window of the most recent observations.
///
/// `RollingTrend` keeps the last `period` values of a stream and fits the trend
/// line on demand, so a bookkeeping loop can push each new data point and ask
/// where the recent trend stands. Summaries are available as soon as two values
/// are buffered; until the window is full they cover every value seen so far.
#[derive(Debug, Clone)]
pub struct RollingTrend {
    /// Most recent observations
    buf: ObservationWindow,
    /// Horizon and confidence level
    config: TrendConfig,
}

impl RollingTrend {
    /// Creates a new `RollingTrend` instance with the specified period.
    ///
    /// # Arguments
    ///
    /// * `period` - Number of observations kept, panics if 0
    /// * `config` - Horizon and confidence level
    ///
    /// # Returns
    ///
    /// * `Self` - The rolling trend object
    pub fn new(period: usize, config: TrendConfig) -> Self {
        Self {
            buf: ObservationWindow::new(period),
            config,
        }
    }

    /// Returns the period of the window
    pub fn period(&self) -> usize {
        self.buf.period()
    }

    /// Returns the number of buffered observations
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` once `period` observations are buffered
    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    /// Returns the most recent observation
    pub fn latest(&self) -> Option<f64> {
        self.buf.latest()
    }

    /// Returns the config used for summaries
    pub const fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Replaces the config used for summaries
    ///
    /// # Arguments
    ///
    /// * `config` - Horizon and confidence level
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling trend object
    pub const fn set_config(&mut self, config: TrendConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Resets the window, keeping the config
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling trend object
    pub fn reset(&mut self) -> &mut Self {
        self.buf.reset();
        self
    }

    /// Pushes a new observation, evicting the oldest once the window is full
    ///
    /// # Arguments
    ///
    /// * `value` - The new observation
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The rolling trend object
    pub fn next(&mut self, value: f64) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Fits the trend line through the buffered observations
    ///
    /// # Returns
    ///
    /// * `Result<LinearFit, TrendError>` - The fit, or `InsufficientData` while fewer than two values are buffered
    pub fn fit(&self) -> Result<LinearFit, TrendError> {
        LinearFit::fit(self.buf.iter())
    }

    /// Summarizes the trend of the buffered observations
    ///
    /// # Returns
    ///
    /// * `Result<TrendSummary, TrendError>` - The summary, or `InsufficientData` while fewer than two values are buffered
    ///
    /// # Examples
    ///
    /// ```
    /// use ta_trend::{RollingTrend, TrendConfig};
    ///
    /// let mut trend = RollingTrend::new(3, TrendConfig::new(2, 0.95));
    /// let mut results = vec![];
    /// [4.0, 3.0, 2.0, 3.0, 4.0, 5.0].iter().for_each(|v| {
    ///     if let Ok(s) = trend.next(*v).summary() {
    ///         results.push(s.probability_slope_positive());
    ///     }
    /// });
    ///
    /// assert_eq!(results, [0.0, 0.0, 0.5, 1.0, 1.0]);
    /// ```
    pub fn summary(&self) -> Result<TrendSummary, TrendError> {
        self.fit()
            .map(|fit| TrendSummary::from_fit(fit, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::summarize;

    #[test]
    fn needs_two_values() {
        let mut trend = RollingTrend::new(4, TrendConfig::default());
        assert_eq!(
            trend.summary(),
            Err(TrendError::InsufficientData { needed: 2, got: 0 })
        );
        assert_eq!(
            trend.next(1.0).summary().map(|s| s.current_estimate()),
            Err(TrendError::InsufficientData { needed: 2, got: 1 })
        );
        assert!(trend.next(2.0).summary().is_ok());
    }

    #[test]
    fn matches_summarize_over_window() {
        let inputs = [1.0, -0.5, 0.8, -1.2, 0.3, -0.9, 0.1, 2.4, 1.7, 3.3];
        let config = TrendConfig::new(4, 0.9);
        let mut trend = RollingTrend::new(5, config);

        for (i, v) in inputs.iter().enumerate() {
            let Ok(rolling) = trend.next(*v).summary() else {
                continue;
            };
            let start = (i + 1).saturating_sub(5);
            let Ok(direct) = summarize(&inputs[start..=i], &config) else {
                panic!("direct summary failed at {i}");
            };
            assert_eq!(rolling, direct);
        }
        assert!(trend.is_full());
        assert_eq!(trend.latest(), Some(3.3));
    }

    #[test]
    fn window_follows_recent_values() {
        let mut trend = RollingTrend::new(3, TrendConfig::new(1, 0.95));
        let mut results = Vec::new();
        for v in [10.0, 9.0, 8.0, 9.0, 10.0] {
            if let Ok(s) = trend.next(v).summary() {
                results.push(s.fit().slope());
            }
        }
        let expected = [-1.0, -1.0, 0.0, 1.0];
        for (r, e) in results.iter().zip(expected.iter()) {
            assert_approx_eq!(r, e, 1e-12);
        }
    }

    #[test]
    fn reset_keeps_config() {
        let config = TrendConfig::new(7, 0.8);
        let mut trend = RollingTrend::new(3, TrendConfig::default());
        trend.set_config(config).next(1.0).next(2.0);
        assert_eq!(trend.len(), 2);

        trend.reset();
        assert_eq!(trend.len(), 0);
        assert_eq!(trend.period(), 3);
        assert_eq!(trend.config(), &config);
    }
}
