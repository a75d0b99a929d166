#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub use utils::normal::{self, NormalDist};

mod error;
pub use error::TrendError;

mod config;
pub use config::{DEFAULT_CONFIDENCE, DEFAULT_HORIZON, TrendConfig};

mod trend;
pub use trend::{LinearFit, MIN_OBSERVATIONS, TrendSummary, summarize};

mod rolling_trend;
pub use rolling_trend::RollingTrend;

mod metrics;
pub use metrics::TradeMetrics;
