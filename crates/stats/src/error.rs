//! Error types for the kestrel-stats crate.

/// Error type for all fallible operations in the kestrel-stats crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Returned when the input series is empty.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when the requested lag cannot be estimated from the series.
    #[error("lag {lag} requires more than {n} observations")]
    LagTooLarge {
        /// Largest lag requested.
        lag: usize,
        /// Number of observations available.
        n: usize,
    },

    /// Returned when the series has zero variance, so correlations are undefined.
    #[error("series has zero variance")]
    ZeroVariance,

    /// Returned when differencing would consume every observation.
    #[error("cannot difference {n} observations {d} times")]
    DifferenceTooLarge {
        /// Number of observations available.
        n: usize,
        /// Requested differencing order.
        d: usize,
    },
}
