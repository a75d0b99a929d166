/// Number of steps past the last observation used when none is configured
pub const DEFAULT_HORIZON: usize = 10;

/// Two-sided confidence level used when none is configured
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Parameters of a trend summary
///
/// Carries the forecast horizon and the confidence level of the interval
/// around the current estimate. Values are passed explicitly to every
/// summary, so separate callers can run with different settings side by side.
///
/// `confidence` must lie in `(0, 1)`. It is not validated: values outside
/// that range produce infinite or NaN interval bounds.
///
/// With the `serde` feature enabled the config can be read from a
/// deployment file. The keys `forecast_horizon` and `confidence_level` are
/// accepted as aliases, and missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrendConfig {
    /// Steps beyond the last observation to extrapolate
    #[cfg_attr(feature = "serde", serde(alias = "forecast_horizon"))]
    horizon: usize,
    /// Two-sided confidence level of the current value interval
    #[cfg_attr(feature = "serde", serde(alias = "confidence_level"))]
    confidence: f64,
}

impl TrendConfig {
    /// Creates a new `TrendConfig`
    ///
    /// # Arguments
    ///
    /// * `horizon` - Steps beyond the last observation to extrapolate
    /// * `confidence` - Two-sided confidence level in `(0, 1)`
    ///
    /// # Returns
    ///
    /// * `Self` - The config object
    pub const fn new(horizon: usize, confidence: f64) -> Self {
        Self {
            horizon,
            confidence,
        }
    }

    /// Returns the forecast horizon
    ///
    /// # Returns
    ///
    /// * `usize` - Steps beyond the last observation
    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    /// Sets the forecast horizon
    ///
    /// # Arguments
    ///
    /// * `horizon` - Steps beyond the last observation
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config object
    pub const fn set_horizon(&mut self, horizon: usize) -> &mut Self {
        self.horizon = horizon;
        self
    }

    /// Returns the confidence level
    ///
    /// # Returns
    ///
    /// * `f64` - The two-sided confidence level
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Sets the confidence level
    ///
    /// # Arguments
    ///
    /// * `confidence` - The two-sided confidence level in `(0, 1)`
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The config object
    pub const fn set_confidence(&mut self, confidence: f64) -> &mut Self {
        self.confidence = confidence;
        self
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON, DEFAULT_CONFIDENCE)
    }
}
