//! Error types for the kestrel-arma crate.

use kestrel_stats::StatsError;

/// Error type for all fallible operations in the kestrel-arma crate.
///
/// This enum covers input validation, infeasible parameters, numerical
/// breakdowns in the linear solves and the Kalman recursion, and optimizer
/// outcomes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArmaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when an intermediate quantity (covariance, variance,
    /// likelihood) becomes NaN or infinite.
    #[error("non-finite value encountered in {stage}")]
    NonFinite {
        /// Computation stage that produced the value.
        stage: &'static str,
    },

    /// Returned when the model order is degenerate (`p + q == 0`).
    #[error("invalid model order: p={p}, q={q} (need p + q >= 1)")]
    InvalidOrder {
        /// AR order.
        p: usize,
        /// MA order.
        q: usize,
    },

    /// Returned when an order-recursive estimator is asked for lag zero.
    #[error("invalid lag {lag}: must be >= 1")]
    InvalidLag {
        /// The invalid lag.
        lag: usize,
    },

    /// Returned when a parameter vector does not have `p + q` entries.
    #[error("parameter vector has {got} entries, expected {expected}")]
    ParameterLength {
        /// Expected length (`p + q`).
        expected: usize,
        /// Length provided.
        got: usize,
    },

    /// Returned when the AR or MA block fails the stability boundary check.
    #[error("parameters lie outside the feasible region")]
    InfeasibleParameters,

    /// Returned when a linear solve meets a non-invertible matrix.
    #[error("singular {dim}x{dim} system")]
    SingularSystem {
        /// Dimension of the system.
        dim: usize,
    },

    /// Returned (as a warning) when the optimizer hits its iteration cap
    /// before the simplex converges.
    #[error("optimizer stalled after {iterations} iterations without converging")]
    OptimizerStalled {
        /// Iterations performed.
        iterations: u64,
    },

    /// Returned when the optimization framework itself fails.
    #[error("optimisation failed: {0}")]
    OptimizationFailed(String),

    /// Returned when a [`FitConfig`](crate::FitConfig) field is out of range.
    #[error("invalid configuration: {field} = {value}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when all candidate ARMA models fail to fit.
    #[error("all ARMA candidates failed (max_p={max_p}, max_q={max_q})")]
    AllCandidatesFailed {
        /// Maximum AR order attempted.
        max_p: usize,
        /// Maximum MA order attempted.
        max_q: usize,
    },

    /// Autocovariance or differencing error.
    #[error(transparent)]
    Stats(#[from] StatsError),
}
