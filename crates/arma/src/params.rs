//! ARMA parameter vectors and the feasibility boundary check.
//!
//! A parameter vector of length `p + q` holds the AR block `phi_1..phi_p`
//! followed by the MA block `theta_1..theta_q`.
//!
//! Feasibility uses a simplified rule: the absolute values of each block must
//! sum to at most 1. This is sufficient for stationarity (AR) and
//! invertibility (MA) but not necessary, so it rejects some models whose
//! characteristic roots do lie outside the unit circle. It is kept because
//! the likelihood surface and the reference fits are defined against it.

use crate::error::ArmaError;

/// Distance from the |coefficient|-sum bound within which a fitted block is
/// reported as lying on the feasibility boundary.
pub(crate) const BOUNDARY_TOLERANCE: f64 = 1e-3;

/// Splits `params` into its AR and MA blocks.
///
/// # Errors
///
/// [`ArmaError::ParameterLength`] if `params.len() != p + q`.
pub(crate) fn split(params: &[f64], p: usize, q: usize) -> Result<(&[f64], &[f64]), ArmaError> {
    if params.len() != p + q {
        return Err(ArmaError::ParameterLength {
            expected: p + q,
            got: params.len(),
        });
    }
    Ok(params.split_at(p))
}

fn abs_sum(block: &[f64]) -> f64 {
    block.iter().map(|x| x.abs()).sum()
}

/// Returns `true` if both blocks pass the |coefficient|-sum check.
pub(crate) fn is_feasible(ar: &[f64], ma: &[f64]) -> bool {
    abs_sum(ar) <= 1.0 && abs_sum(ma) <= 1.0
}

/// Returns `true` if either non-empty block sits within
/// [`BOUNDARY_TOLERANCE`] of the |coefficient|-sum bound.
pub(crate) fn at_boundary(ar: &[f64], ma: &[f64]) -> bool {
    [ar, ma]
        .iter()
        .any(|block| !block.is_empty() && abs_sum(block) >= 1.0 - BOUNDARY_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_blocks() {
        let params = [0.5, -0.2, 0.3];
        let (ar, ma) = split(&params, 2, 1).unwrap();
        assert_eq!(ar, &[0.5, -0.2]);
        assert_eq!(ma, &[0.3]);
    }

    #[test]
    fn split_pure_ma() {
        let params = [0.4];
        let (ar, ma) = split(&params, 0, 1).unwrap();
        assert!(ar.is_empty());
        assert_eq!(ma, &[0.4]);
    }

    #[test]
    fn split_wrong_length() {
        let err = split(&[0.1, 0.2], 1, 0).unwrap_err();
        assert_eq!(
            err,
            ArmaError::ParameterLength {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn feasible_inside() {
        assert!(is_feasible(&[0.5, -0.3], &[0.2]));
        assert!(is_feasible(&[], &[]));
    }

    #[test]
    fn feasible_exactly_on_bound() {
        assert!(is_feasible(&[0.5, -0.5], &[]));
        assert!(is_feasible(&[], &[-1.0]));
    }

    #[test]
    fn infeasible_ar_block() {
        assert!(!is_feasible(&[0.7, 0.4], &[0.1]));
    }

    #[test]
    fn infeasible_ma_block() {
        assert!(!is_feasible(&[0.1], &[-1.2]));
    }

    #[test]
    fn simplified_check_rejects_stationary_ar2() {
        // 1 - 1.2z + 0.4z^2 has complex roots with |z|^2 = 2.5, so this AR(2)
        // is stationary, but its |coefficient| sum is 1.6.
        assert!(is_feasible(&[0.6, 0.3], &[]));
        assert!(!is_feasible(&[1.2, -0.4], &[]));
    }

    #[test]
    fn boundary_detection() {
        assert!(at_boundary(&[0.9995], &[]));
        assert!(at_boundary(&[0.1], &[-0.5, 0.4999]));
        assert!(!at_boundary(&[0.5], &[0.2]));
        assert!(!at_boundary(&[], &[]));
    }

    #[test]
    fn non_finite_params_are_infeasible() {
        assert!(!is_feasible(&[f64::NAN], &[]));
        assert!(!is_feasible(&[], &[f64::INFINITY]));
    }
}
