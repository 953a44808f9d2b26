//! Dense linear algebra for the closed-form estimators.
//!
//! Toeplitz construction on [`ndarray`] arrays. Inversion is delegated to
//! [`nalgebra`], copying across at the boundary.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

use crate::error::ArmaError;

/// Builds the symmetric Toeplitz matrix whose first row and first column
/// are `values`.
///
/// # Example
///
/// ```
/// let t = kestrel_arma::toeplitz(&[0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(t.row(1).to_vec(), vec![1.0, 0.0, 1.0, 2.0]);
/// ```
pub fn toeplitz(values: &[f64]) -> Array2<f64> {
    let n = values.len();
    Array2::from_shape_fn((n, n), |(i, j)| values[i.abs_diff(j)])
}

/// Inverts a square matrix through [`nalgebra`].
///
/// # Errors
///
/// [`ArmaError::SingularSystem`] if the matrix is empty, all zero or has no
/// finite inverse, [`ArmaError::NonFinite`] if the input holds NaN or
/// infinity.
pub(crate) fn inverse(matrix: &Array2<f64>) -> Result<Array2<f64>, ArmaError> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());

    if matrix.iter().any(|x| !x.is_finite()) {
        return Err(ArmaError::NonFinite {
            stage: "matrix inversion",
        });
    }
    if n == 0 || matrix.iter().all(|&x| x == 0.0) {
        return Err(ArmaError::SingularSystem { dim: n });
    }

    let dense = DMatrix::from_fn(n, n, |i, j| matrix[[i, j]]);
    let inv = dense
        .try_inverse()
        .filter(|inv| inv.iter().all(|x| x.is_finite()))
        .ok_or(ArmaError::SingularSystem { dim: n })?;

    Ok(Array2::from_shape_fn((n, n), |(i, j)| inv[(i, j)]))
}

/// Solves the Toeplitz normal equations `R · phi = r[1..=k]`, where `R` is
/// the `k x k` Toeplitz matrix built from `r[0..k]`.
///
/// `autocov` holds `k + 1` autocovariance-like values.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArmaError::InsufficientData`] | fewer than 2 values |
/// | [`ArmaError::SingularSystem`] | the Toeplitz matrix is not invertible |
pub fn solve_toeplitz(autocov: &[f64]) -> Result<Vec<f64>, ArmaError> {
    if autocov.len() < 2 {
        return Err(ArmaError::InsufficientData {
            n: autocov.len(),
            min: 2,
        });
    }
    let k = autocov.len() - 1;
    let r = toeplitz(&autocov[..k]);
    let rhs = Array1::from(autocov[1..].to_vec());
    let phi = inverse(&r)?.dot(&rhs);
    Ok(phi.to_vec())
}
