//! Gaussian-driven ARMA series generators.
//!
//! Each generator runs the recursion
//! `y_t = sum(phi_i * y_{t-i}) + e_t + sum(theta_j * e_{t-j})` from zero
//! initial conditions, discards a burn-in of [`BURN_IN`] values, and returns
//! the next `n`. Coefficients are not checked for stationarity; explosive
//! AR blocks produce explosive paths.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ArmaError;

/// Values discarded from the start of every simulated path.
pub const BURN_IN: usize = 100;

/// Simulates `n` values of an AR(p) process with innovation standard
/// deviation `sigma`.
///
/// # Errors
///
/// [`ArmaError::InvalidConfig`] if `sigma` is negative or non-finite.
pub fn ar<R: Rng>(n: usize, phi: &[f64], sigma: f64, rng: &mut R) -> Result<Vec<f64>, ArmaError> {
    arma(n, phi, &[], sigma, rng)
}

/// Simulates `n` values of an MA(q) process with innovation standard
/// deviation `sigma`.
///
/// # Errors
///
/// [`ArmaError::InvalidConfig`] if `sigma` is negative or non-finite.
pub fn ma<R: Rng>(
    n: usize,
    theta: &[f64],
    sigma: f64,
    rng: &mut R,
) -> Result<Vec<f64>, ArmaError> {
    arma(n, &[], theta, sigma, rng)
}

/// Simulates `n` values of an ARMA(p,q) process with innovation standard
/// deviation `sigma`.
///
/// # Example
///
/// ```
/// use kestrel_arma::simulate;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let y = simulate::arma(500, &[0.5], &[0.3], 1.0, &mut rng).unwrap();
/// assert_eq!(y.len(), 500);
/// ```
///
/// # Errors
///
/// [`ArmaError::InvalidConfig`] if `sigma` is negative or non-finite.
pub fn arma<R: Rng>(
    n: usize,
    phi: &[f64],
    theta: &[f64],
    sigma: f64,
    rng: &mut R,
) -> Result<Vec<f64>, ArmaError> {
    let noise = innovations(sigma)?;
    Ok(path(n, phi, theta, &noise, rng))
}

fn innovations(sigma: f64) -> Result<Normal<f64>, ArmaError> {
    let invalid = ArmaError::InvalidConfig {
        field: "sigma",
        value: sigma,
    };
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(invalid);
    }
    Normal::new(0.0, sigma).map_err(|_| invalid)
}

/// One post-burn-in path of length `n`.
pub(crate) fn path<R: Rng>(
    n: usize,
    phi: &[f64],
    theta: &[f64],
    noise: &Normal<f64>,
    rng: &mut R,
) -> Vec<f64> {
    let total = BURN_IN + n;
    let mut y = Vec::with_capacity(total);
    let mut eps = Vec::with_capacity(total);

    for t in 0..total {
        let e = noise.sample(rng);
        let ar: f64 = phi
            .iter()
            .take(t)
            .enumerate()
            .map(|(i, c)| c * y[t - 1 - i])
            .sum();
        let ma: f64 = theta
            .iter()
            .take(t)
            .enumerate()
            .map(|(j, c)| c * eps[t - 1 - j])
            .sum();
        y.push(ar + e + ma);
        eps.push(e);
    }

    y.split_off(BURN_IN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sample_stats(y: &[f64]) -> (f64, f64, f64) {
        let n = y.len() as f64;
        let mean = y.iter().sum::<f64>() / n;
        let var = y.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let cov = y
            .iter()
            .skip(1)
            .zip(y)
            .map(|(a, b)| (a - mean) * (b - mean))
            .sum::<f64>()
            / n;
        (mean, var, cov / var)
    }

    #[test]
    fn lengths() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert_eq!(ar(250, &[0.5], 1.0, &mut rng).unwrap().len(), 250);
        assert_eq!(ma(10, &[0.5, 0.2], 1.0, &mut rng).unwrap().len(), 10);
        assert!(arma(0, &[0.5], &[0.1], 1.0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn white_noise_stats() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(123);
        let y = arma(10_000, &[], &[], 2.0_f64.sqrt(), &mut rng).unwrap();
        let (mean, var, _) = sample_stats(&y);
        assert!(mean.abs() < 0.1, "mean = {mean}");
        assert!((var - 2.0).abs() < 0.3, "var = {var}");
    }

    #[test]
    fn ar1_stats() {
        let phi = 0.7;
        let mut rng = rand::rngs::StdRng::seed_from_u64(456);
        let y = ar(10_000, &[phi], 1.0, &mut rng).unwrap();
        let (mean, var, acf1) = sample_stats(&y);
        let theoretical_var = 1.0 / (1.0 - phi * phi);
        assert!(mean.abs() < 0.2, "mean = {mean}");
        assert!(
            (var - theoretical_var).abs() < 0.5,
            "var = {var}, expected = {theoretical_var}"
        );
        assert!((acf1 - phi).abs() < 0.1, "acf1 = {acf1}, expected = {phi}");
    }

    #[test]
    fn ma1_stats() {
        let theta = 0.6;
        let sigma2: f64 = 1.5;
        let mut rng = rand::rngs::StdRng::seed_from_u64(789);
        let y = ma(10_000, &[theta], sigma2.sqrt(), &mut rng).unwrap();
        let (_, var, acf1) = sample_stats(&y);
        let theoretical_var = sigma2 * (1.0 + theta * theta);
        let theoretical_acf1 = theta / (1.0 + theta * theta);
        assert!(
            (var - theoretical_var).abs() < 0.5,
            "var = {var}, expected = {theoretical_var}"
        );
        assert!((acf1 - theoretical_acf1).abs() < 0.1, "acf1 = {acf1}");
    }

    #[test]
    fn zero_sigma_is_silent() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let y = arma(20, &[0.5], &[0.5], 0.0, &mut rng).unwrap();
        assert!(y.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn invalid_sigma() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        for sigma in [-1.0, f64::NAN, f64::INFINITY] {
            let err = ar(10, &[0.5], sigma, &mut rng).unwrap_err();
            assert!(matches!(err, ArmaError::InvalidConfig { field: "sigma", .. }));
        }
    }

    #[test]
    fn deterministic_with_seed() {
        let mut a = rand::rngs::StdRng::seed_from_u64(42);
        let mut b = rand::rngs::StdRng::seed_from_u64(42);
        assert_eq!(
            arma(64, &[0.4, -0.2], &[0.3], 1.0, &mut a).unwrap(),
            arma(64, &[0.4, -0.2], &[0.3], 1.0, &mut b).unwrap()
        );
    }
}
