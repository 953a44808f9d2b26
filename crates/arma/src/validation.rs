//! Input checks shared by every estimator entry point.

use crate::error::ArmaError;

/// Rejects empty series and series holding NaN or infinity.
pub(crate) fn check_series(data: &[f64]) -> Result<(), ArmaError> {
    if data.is_empty() {
        return Err(ArmaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArmaError::NonFiniteData);
    }
    Ok(())
}

/// Rejects the degenerate ARMA(0, 0) order.
pub(crate) fn check_order(p: usize, q: usize) -> Result<(), ArmaError> {
    if p + q == 0 {
        return Err(ArmaError::InvalidOrder { p, q });
    }
    Ok(())
}
