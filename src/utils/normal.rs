//! Normal distribution functions used to turn standard errors into probabilities

use core::f64::consts::FRAC_1_SQRT_2;

use num_traits::Float;

const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

// Rational approximation coefficients for the inverse normal CDF
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.02425;

/// Returns the standard normal cumulative distribution function at `x`
///
/// # Arguments
///
/// * `x` - The point to evaluate
///
/// # Returns
///
/// * `f64` - `P(Z <= x)` for a standard normal `Z`
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

/// Returns the standard normal survival function at `x`
///
/// Evaluated directly on the upper tail, so it keeps full relative precision
/// where `1.0 - cdf(x)` would cancel.
///
/// # Arguments
///
/// * `x` - The point to evaluate
///
/// # Returns
///
/// * `f64` - `P(Z > x)` for a standard normal `Z`
#[inline]
pub fn sf(x: f64) -> f64 {
    0.5 * libm::erfc(x * FRAC_1_SQRT_2)
}

/// Returns the standard normal quantile for probability `p`
///
/// Uses a rational approximation refined by one Halley step against [`cdf`],
/// which brings the result to within a few ulps of reference implementations.
///
/// # Arguments
///
/// * `p` - Probability, expected in `(0, 1)`
///
/// # Returns
///
/// * `f64` - `x` such that `cdf(x) == p`; `-inf` for `p <= 0`, `+inf` for
///   `p >= 1`, NaN for NaN
pub fn inv_cdf(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let x = if p < P_LOW {
        let q = Float::sqrt(-2.0 * Float::ln(p));
        tail(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = Float::sqrt(-2.0 * Float::ln(1.0 - p));
        -tail(q)
    };

    let e = cdf(x) - p;
    let u = e * SQRT_2PI * Float::exp(x * x / 2.0);
    x - u / (1.0 + x * u / 2.0)
}

#[inline]
fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

/// A normal distribution with mean `mu` and standard deviation `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalDist {
    mu: f64,
    sigma: f64,
}

impl NormalDist {
    /// Creates a new `NormalDist`
    ///
    /// # Arguments
    ///
    /// * `mu` - The mean
    /// * `sigma` - The standard deviation, expected to be positive
    ///
    /// # Returns
    ///
    /// * `Self` - The distribution
    pub const fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Returns the standard normal distribution
    pub const fn standard() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Returns the mean
    pub const fn mean(&self) -> f64 {
        self.mu
    }

    /// Returns the standard deviation
    pub const fn stddev(&self) -> f64 {
        self.sigma
    }

    /// Returns `P(X <= x)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ta_trend::NormalDist;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let dist = NormalDist::new(1.0, 2.0);
    /// assert_approx_eq!(dist.cdf(1.0), 0.5, 1e-15);
    /// assert_approx_eq!(dist.cdf(3.0), 0.8413447460685429, 1e-12);
    /// ```
    pub fn cdf(&self, x: f64) -> f64 {
        cdf((x - self.mu) / self.sigma)
    }

    /// Returns `P(X > x)`
    pub fn sf(&self, x: f64) -> f64 {
        sf((x - self.mu) / self.sigma)
    }

    /// Returns the value below which a fraction `p` of the distribution lies
    pub fn inv_cdf(&self, p: f64) -> f64 {
        self.mu + self.sigma * inv_cdf(p)
    }
}

impl Default for NormalDist {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn cdf_works() {
        let inputs = [0.0, 1.0, -1.0, -3.0, 5.0];
        let expected = [
            0.5,
            0.8413447460685429,
            0.15865525393145707,
            0.0013498980316301035,
            0.9999997133484282,
        ];
        for (x, e) in inputs.iter().zip(expected.iter()) {
            assert_approx_eq!(cdf(*x), e, 1e-14);
        }
    }

    #[test]
    fn sf_complements_cdf() {
        for x in [-4.0, -1.5, 0.0, 0.3, 2.0, 6.0] {
            assert_approx_eq!(sf(x) + cdf(x), 1.0, 1e-14);
        }
        assert!(sf(10.0) > 0.0);
    }

    #[test]
    fn inv_cdf_works() {
        let inputs = [0.5, 0.9, 0.95, 0.975, 0.995, 0.01, 0.001, 1e-10];
        let expected = [
            0.0,
            1.2815515655446008,
            1.6448536269514715,
            1.9599639845400536,
            2.5758293035489,
            -2.3263478740408408,
            -3.090232306167813,
            -6.361340902404056,
        ];
        for (p, e) in inputs.iter().zip(expected.iter()) {
            assert_approx_eq!(inv_cdf(*p), e, 1e-9);
        }
    }

    #[test]
    fn inv_cdf_is_symmetric() {
        for p in [0.001, 0.02, 0.1, 0.3] {
            assert_approx_eq!(inv_cdf(p), -inv_cdf(1.0 - p), 1e-9);
        }
    }

    #[test]
    fn inv_cdf_out_of_domain() {
        assert_eq!(inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inv_cdf(1.0), f64::INFINITY);
        assert_eq!(inv_cdf(-0.5), f64::NEG_INFINITY);
        assert!(inv_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn normal_dist_scales() {
        let dist = NormalDist::new(2.0, 0.5);
        assert_approx_eq!(dist.inv_cdf(0.975), 2.0 + 0.5 * 1.9599639845400536, 1e-9);
        assert_approx_eq!(dist.sf(2.0), 0.5, 1e-15);
        assert_eq!(NormalDist::default(), NormalDist::standard());
    }
}
