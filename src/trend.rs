use num_traits::Float;
use tracing::{debug, trace};

use crate::{Kbn, NormalDist, TrendConfig, TrendError, utils::normal};

/// Minimum number of observations a line can be fitted through
pub const MIN_OBSERVATIONS: usize = 2;

/// An ordinary least squares line fitted through equally spaced observations.
///
/// Observations are placed at positions `0, 1, ..., n-1`, so the position is the
/// time axis and the fit is a regression of value on index. Besides the slope
/// and intercept the fit keeps the residual standard error and `S_xx`, which is
/// all that is needed to put standard errors on the line at any position.
///
/// With exactly two observations there are no residual degrees of freedom; the
/// residual standard error is defined as zero and the fit is treated as exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Number of observations
    len: usize,
    /// Slope per unit step
    slope: f64,
    /// Fitted value at position 0
    intercept: f64,
    /// Mean position, `(n - 1) / 2`
    x_mean: f64,
    /// Sum of squared position deviations
    s_xx: f64,
    /// Residual standard error
    residual_std_error: f64,
}

impl LinearFit {
    /// Fits a line through the observations
    ///
    /// The values are walked three times (mean, cross products, residuals), so
    /// the iterator has to be cloneable. Sums use Kahan-Babuska-Neumaier
    /// compensated summation.
    ///
    /// # Arguments
    ///
    /// * `values` - Ordered observations, oldest first
    ///
    /// # Returns
    ///
    /// * `Result<Self, TrendError>` - The fit, or `InsufficientData` if fewer than two values were given
    ///
    /// # Examples
    ///
    /// ```
    /// use ta_trend::LinearFit;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let fit = LinearFit::fit([2.0, 3.1, 2.7, 4.2, 4.0, 5.3]).unwrap();
    /// assert_approx_eq!(fit.slope(), 0.5914285714285714, 1e-12);
    /// assert_approx_eq!(fit.intercept(), 2.071428571428571, 1e-12);
    /// assert_approx_eq!(fit.residual_std_error(), 0.47268231554456464, 1e-12);
    /// ```
    pub fn fit<I>(values: I) -> Result<Self, TrendError>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let values = values.into_iter();

        let mut len = 0usize;
        let mut sum = Kbn::<f64>::default();
        for y in values.clone() {
            sum += y;
            len += 1;
        }
        if len < MIN_OBSERVATIONS {
            return Err(TrendError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: len,
            });
        }

        let n = len as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = sum.total() / n;

        let mut s_xx = Kbn::<f64>::default();
        let mut s_xy = Kbn::<f64>::default();
        for (i, y) in values.clone().enumerate() {
            let dx = i as f64 - x_mean;
            s_xx += dx * dx;
            s_xy += dx * (y - y_mean);
        }
        let s_xx = s_xx.total();
        let slope = s_xy.total() / s_xx;
        let intercept = y_mean - slope * x_mean;

        let residual_std_error = if len == MIN_OBSERVATIONS {
            0.0
        } else {
            let mut ssr = Kbn::<f64>::default();
            for (i, y) in values.enumerate() {
                let r = y - (intercept + slope * i as f64);
                ssr += r * r;
            }
            Float::sqrt(ssr.total() / (n - 2.0))
        };

        trace!(len, slope, intercept, residual_std_error, "fitted trend line");
        if residual_std_error == 0.0 {
            debug!(len, slope, "residual error is zero, trend probabilities are deterministic");
        }

        Ok(Self {
            len,
            slope,
            intercept,
            x_mean,
            s_xx,
            residual_std_error,
        })
    }

    /// Returns the number of observations
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the position of the last observation, `n - 1`
    pub fn last_position(&self) -> f64 {
        (self.len - 1) as f64
    }

    /// Returns the slope per unit step
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Returns the fitted value at position 0
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns the residual standard error
    pub const fn residual_std_error(&self) -> f64 {
        self.residual_std_error
    }

    /// Returns the standard error of the slope
    pub fn slope_std_error(&self) -> f64 {
        self.residual_std_error / Float::sqrt(self.s_xx)
    }

    /// Returns the fitted value at position `x`
    ///
    /// # Arguments
    ///
    /// * `x` - Position on the index axis, may lie past the last observation
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Returns the standard error of the fitted mean at position `x`
    ///
    /// # Arguments
    ///
    /// * `x` - Position on the index axis
    pub fn standard_error_at(&self, x: f64) -> f64 {
        let dx = x - self.x_mean;
        self.residual_std_error * Float::sqrt(1.0 / self.len as f64 + dx * dx / self.s_xx)
    }

    /// Returns the two-sided confidence interval of the fitted value at `x`
    ///
    /// # Arguments
    ///
    /// * `x` - Position on the index axis
    /// * `confidence` - Confidence level in `(0, 1)`, not validated
    ///
    /// # Returns
    ///
    /// * `(f64, f64)` - Lower and upper bounds
    pub fn interval_at(&self, x: f64, confidence: f64) -> (f64, f64) {
        let estimate = self.predict(x);
        let se = self.standard_error_at(x);
        if se == 0.0 {
            return (estimate, estimate);
        }
        let z = normal::inv_cdf((1.0 + confidence) / 2.0);
        (estimate - z * se, estimate + z * se)
    }

    /// Returns the probability that the true slope is positive
    ///
    /// Deterministic when the slope has no standard error: `1.0` for a rising
    /// line, `0.0` otherwise.
    pub fn probability_slope_positive(&self) -> f64 {
        probability_positive(self.slope, self.slope_std_error())
    }

    /// Returns the probability that the fitted value at `x` is above zero
    ///
    /// # Arguments
    ///
    /// * `x` - Position on the index axis
    pub fn probability_above_zero_at(&self, x: f64) -> f64 {
        probability_positive(self.predict(x), self.standard_error_at(x))
    }
}

fn probability_positive(mean: f64, se: f64) -> f64 {
    if se == 0.0 {
        if mean > 0.0 { 1.0 } else { 0.0 }
    } else {
        NormalDist::new(mean, se).sf(0.0)
    }
}

/// Where a trend stands now and how likely it is to be heading up.
///
/// Produced fresh by every call to [`summarize`]; it has no identity beyond
/// the observations and config it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    /// The underlying line
    fit: LinearFit,
    /// Fitted value at the last observed position
    current_estimate: f64,
    /// Confidence interval around `current_estimate`
    current_interval: (f64, f64),
    /// Probability the slope is positive
    probability_slope_positive: f64,
    /// Fitted value `horizon` steps past the last observation
    future_estimate: f64,
    /// Probability the value `horizon` steps ahead is above zero
    probability_future_above_zero: f64,
}

impl TrendSummary {
    /// Summarizes an already fitted line
    ///
    /// # Arguments
    ///
    /// * `fit` - The fitted line
    /// * `config` - Horizon and confidence level
    ///
    /// # Returns
    ///
    /// * `Self` - The summary
    pub fn from_fit(fit: LinearFit, config: &TrendConfig) -> Self {
        let current_x = fit.last_position();
        let future_x = current_x + config.horizon() as f64;

        Self {
            fit,
            current_estimate: fit.predict(current_x),
            current_interval: fit.interval_at(current_x, config.confidence()),
            probability_slope_positive: fit.probability_slope_positive(),
            future_estimate: fit.predict(future_x),
            probability_future_above_zero: fit.probability_above_zero_at(future_x),
        }
    }

    /// Returns the fitted line
    pub const fn fit(&self) -> &LinearFit {
        &self.fit
    }

    /// Returns the fitted value at the last observed position
    pub const fn current_estimate(&self) -> f64 {
        self.current_estimate
    }

    /// Returns the `(low, high)` confidence interval around the current estimate
    pub const fn current_interval(&self) -> (f64, f64) {
        self.current_interval
    }

    /// Returns the probability that the slope is positive, in `[0, 1]`
    pub const fn probability_slope_positive(&self) -> f64 {
        self.probability_slope_positive
    }

    /// Returns the fitted value at the forecast horizon
    pub const fn future_estimate(&self) -> f64 {
        self.future_estimate
    }

    /// Returns the probability that the value at the horizon is above zero, in `[0, 1]`
    pub const fn probability_future_above_zero(&self) -> f64 {
        self.probability_future_above_zero
    }
}

/// Summarizes where a numeric trend is now and its chance of improvement
///
/// Fits a least squares line through the observations, indexed `0..n-1`, and
/// reports the estimate of the last observation with its confidence interval,
/// the probability the slope is positive, and the probability the value
/// `config.horizon()` steps ahead is above zero.
///
/// The function is pure: identical inputs give bit-identical summaries.
///
/// # Arguments
///
/// * `observations` - Ordered observations, oldest first
/// * `config` - Horizon and confidence level
///
/// # Returns
///
/// * `Result<TrendSummary, TrendError>` - The summary, or `InsufficientData` for fewer than two observations
///
/// # Examples
///
/// ```
/// use ta_trend::{summarize, TrendConfig, TrendError};
///
/// let summary = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0], &TrendConfig::new(1, 0.95)).unwrap();
/// assert_eq!(summary.current_estimate(), 5.0);
/// assert_eq!(summary.probability_slope_positive(), 1.0);
/// assert_eq!(summary.probability_future_above_zero(), 1.0);
///
/// let err = summarize(&[1.0], &TrendConfig::default()).unwrap_err();
/// assert_eq!(err, TrendError::InsufficientData { needed: 2, got: 1 });
/// ```
pub fn summarize(observations: &[f64], config: &TrendConfig) -> Result<TrendSummary, TrendError> {
    let fit = LinearFit::fit(observations.iter().copied())?;
    Ok(TrendSummary::from_fit(fit, config))
}
