//! ARMA state-space representation.
//!
//! Converts ARMA(p,q) coefficients into innovations form:
//!
//! ```text
//! x[t+1] = T * x[t] + H * e[t]     (state transition)
//! y[t]   = Z * x[t] + e[t]          (observation)
//! ```
//!
//! where `T` is the companion-form transition matrix, `H` the state-loading
//! vector with `H[i] = phi[i] + theta[i]`, `Z` selects the first state
//! component, and the state dimension is `m = max(p, q + 1)`.

use ndarray::{Array1, Array2};

use crate::error::ArmaError;
use crate::params;

/// State-space matrices `{T, H, Z}` of an ARMA(p,q) model.
///
/// Built fresh for every likelihood evaluation and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    m: usize,
    t: Array2<f64>,
    h: Array1<f64>,
    z: Array1<f64>,
}

impl StateSpace {
    /// Builds the state-space form from AR and MA coefficients.
    ///
    /// No feasibility check is applied; see [`StateSpace::from_params`].
    pub fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let m = p.max(q + 1);

        // First column: T[i, 0] = ar[i] for i < p.
        // Super-diagonal: T[i, i+1] = 1.0 for i = 0..m-2.
        let mut t = Array2::zeros((m, m));
        for (i, &phi) in ar.iter().enumerate() {
            t[[i, 0]] = phi;
        }
        for i in 0..m - 1 {
            t[[i, i + 1]] = 1.0;
        }

        let mut h = Array1::zeros(m);
        for (i, &phi) in ar.iter().enumerate() {
            h[i] += phi;
        }
        for (i, &theta) in ma.iter().enumerate() {
            h[i] += theta;
        }

        let mut z = Array1::zeros(m);
        z[0] = 1.0;

        Self { m, t, h, z }
    }

    /// Splits a `p + q` parameter vector and builds the state-space form.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArmaError::ParameterLength`] | `params.len() != p + q` |
    /// | [`ArmaError::InfeasibleParameters`] | a block's |coefficient| sum exceeds 1 |
    pub fn from_params(params: &[f64], p: usize, q: usize) -> Result<Self, ArmaError> {
        let (ar, ma) = params::split(params, p, q)?;
        if !params::is_feasible(ar, ma) {
            return Err(ArmaError::InfeasibleParameters);
        }
        Ok(Self::new(ar, ma))
    }

    /// State dimension `m = max(p, q + 1)`.
    pub fn dim(&self) -> usize {
        self.m
    }

    /// Transition matrix `T` (m×m) in companion form.
    pub fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// State-loading vector `H` (length m).
    pub fn h(&self) -> &Array1<f64> {
        &self.h
    }

    /// Selection row `Z = [1, 0, …, 0]` (length m).
    pub fn z(&self) -> &Array1<f64> {
        &self.z
    }
}
