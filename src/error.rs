use thiserror::Error;

/// Errors returned while summarizing a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrendError {
    /// Fewer observations than a straight-line fit requires
    #[error("trend: at least {needed} data points are required to assess a trend, got {got}")]
    InsufficientData {
        /// Minimum number of observations
        needed: usize,
        /// Number of observations supplied
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn insufficient_data_message() {
        let err = TrendError::InsufficientData { needed: 2, got: 1 };
        assert_eq!(
            err.to_string(),
            "trend: at least 2 data points are required to assess a trend, got 1"
        );
    }
}
