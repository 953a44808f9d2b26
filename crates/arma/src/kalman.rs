//! Kalman filter for ARMA likelihood evaluation.
//!
//! Runs a univariate Kalman filter over the [`StateSpace`] form of the model
//! and returns the exact Gaussian log-likelihood via
//! prediction error decomposition, with the innovation variance concentrated
//! out.
//!
//! Evaluation is a pure function of `(params, series, p, q)`: every call
//! builds its own matrices, so evaluators may run concurrently on a shared
//! series.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Axis};

use crate::error::ArmaError;
use crate::state_space::StateSpace;
use crate::validation::{check_order, check_series};

/// Objective value the optimizer sees for parameters outside the feasible
/// region.
pub(crate) const INFEASIBLE_PENALTY: f64 = f64::MAX;

/// Result of one Kalman pass over a series.
#[derive(Clone, Debug, PartialEq)]
pub struct KalmanRunResult {
    log_likelihood: f64,
    sigma2: f64,
    aic: f64,
    innovations: Vec<f64>,
}

impl KalmanRunResult {
    /// Exact Gaussian log-likelihood with `sigma2` concentrated out.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Concentrated innovation variance `sum(v_t^2 / f_t) / n`.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Akaike Information Criterion, `-(2 logL - 2 (p + q + 1))`.
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// One-step-ahead prediction errors `v_t`.
    pub fn innovations(&self) -> &[f64] {
        &self.innovations
    }

    pub(crate) fn into_innovations(self) -> Vec<f64> {
        self.innovations
    }
}

/// Outcome of a likelihood evaluation.
///
/// Parameters failing the feasibility check are reported as
/// [`Evaluation::Infeasible`] instead of a sentinel score, so callers can tell
/// "very poor fit" apart from "outside the admissible region".
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// The filter ran; holds its output.
    Feasible(KalmanRunResult),
    /// The AR or MA block failed the |coefficient|-sum check; the filter was
    /// not run.
    Infeasible,
}

impl Evaluation {
    /// Returns `true` for [`Evaluation::Feasible`].
    pub fn is_feasible(&self) -> bool {
        matches!(self, Evaluation::Feasible(_))
    }

    /// Converts into a `Result`, mapping [`Evaluation::Infeasible`] to
    /// [`ArmaError::InfeasibleParameters`].
    pub fn into_result(self) -> Result<KalmanRunResult, ArmaError> {
        match self {
            Evaluation::Feasible(run) => Ok(run),
            Evaluation::Infeasible => Err(ArmaError::InfeasibleParameters),
        }
    }

    /// Negated log-likelihood, or [`INFEASIBLE_PENALTY`].
    pub(crate) fn objective(&self) -> f64 {
        match self {
            Evaluation::Feasible(run) => -run.log_likelihood,
            Evaluation::Infeasible => INFEASIBLE_PENALTY,
        }
    }
}

/// Stateless exact-likelihood evaluator for ARMA(p,q) parameter vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct KalmanEvaluator;

impl KalmanEvaluator {
    /// Creates an evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the log-likelihood of `params` (AR block then MA block) on
    /// `series`.
    ///
    /// The series is used as given; no centring is applied.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArmaError::InvalidOrder`] | `p + q == 0` |
    /// | [`ArmaError::EmptyData`] | `series` is empty |
    /// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArmaError::ParameterLength`] | `params.len() != p + q` |
    /// | [`ArmaError::NonFinite`] | the recursion or likelihood overflowed |
    pub fn evaluate(
        &self,
        params: &[f64],
        series: &[f64],
        p: usize,
        q: usize,
    ) -> Result<Evaluation, ArmaError> {
        check_order(p, q)?;
        check_series(series)?;
        self.evaluate_checked(params, series, p, q)
    }

    /// As [`KalmanEvaluator::evaluate`] for inputs already validated once.
    pub(crate) fn evaluate_checked(
        &self,
        params: &[f64],
        series: &[f64],
        p: usize,
        q: usize,
    ) -> Result<Evaluation, ArmaError> {
        match StateSpace::from_params(params, p, q) {
            Ok(ss) => filter(&ss, series, p + q).map(Evaluation::Feasible),
            Err(ArmaError::InfeasibleParameters) => Ok(Evaluation::Infeasible),
            Err(e) => Err(e),
        }
    }
}

/// Exact log-likelihood of `params` on `series`.
///
/// Shorthand for `KalmanEvaluator::new().evaluate(params, series, p, q)`.
///
/// # Example
///
/// ```
/// use kestrel_arma::{log_likelihood, Evaluation};
///
/// let series = [0.3, -0.1, 0.4, 0.2, -0.5, 0.1];
/// let eval = log_likelihood(&[0.2], &series, 1, 0).unwrap();
/// assert!(eval.is_feasible());
///
/// let eval = log_likelihood(&[1.5], &series, 1, 0).unwrap();
/// assert_eq!(eval, Evaluation::Infeasible);
/// ```
pub fn log_likelihood(
    params: &[f64],
    series: &[f64],
    p: usize,
    q: usize,
) -> Result<Evaluation, ArmaError> {
    KalmanEvaluator::new().evaluate(params, series, p, q)
}

/// Runs the filter from `a0 = 0`, `P0 = I` with unit observation noise.
fn filter(
    ss: &StateSpace,
    series: &[f64],
    n_coefficients: usize,
) -> Result<KalmanRunResult, ArmaError> {
    let m = ss.dim();
    let (t, h, z) = (ss.t(), ss.h(), ss.z());

    let mut a = Array1::<f64>::zeros(m);
    let mut p = Array2::<f64>::eye(m);
    let mut innovations = Vec::with_capacity(series.len());
    let mut weighted_sq = 0.0;
    let mut log_f_sum = 0.0;

    for &y in series {
        let v = y - z.dot(&a);
        let pz = p.dot(z);
        let f = z.dot(&pz) + 1.0;
        if !f.is_finite() || f <= 0.0 {
            return Err(ArmaError::NonFinite {
                stage: "innovation variance",
            });
        }

        let k = (t.dot(&pz) + h) / f;
        a = t.dot(&a) + &k * v;
        let l = t - &outer(&k, z);
        let j = h - &k;
        p = t.dot(&p).dot(&l.t()) + outer(h, &j);

        weighted_sq += v * v / f;
        log_f_sum += f.ln();
        innovations.push(v);
    }

    if !weighted_sq.is_finite() || p.iter().any(|x| !x.is_finite()) {
        return Err(ArmaError::NonFinite {
            stage: "kalman recursion",
        });
    }

    let n = series.len() as f64;
    let sigma2 = weighted_sq / n;
    if sigma2 <= 0.0 {
        return Err(ArmaError::NonFinite {
            stage: "concentrated variance",
        });
    }

    let log_likelihood = -0.5 * (n * (2.0 * PI).ln() + n * sigma2.ln() + log_f_sum + n);
    if !log_likelihood.is_finite() {
        return Err(ArmaError::NonFinite {
            stage: "log-likelihood",
        });
    }
    let aic = -(2.0 * log_likelihood - 2.0 * (n_coefficients + 1) as f64);

    Ok(KalmanRunResult {
        log_likelihood,
        sigma2,
        aic,
        innovations,
    })
}

/// Outer product `a · bᵀ`.
fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    let col = a.view().insert_axis(Axis(1));
    let row = b.view().insert_axis(Axis(0));
    col.dot(&row)
}
