//! Simulation integration tests for kestrel-arma.

mod common;

use common::{ar, ma, rng};
use kestrel_arma::{ArimaSpec, FitConfig};
use kestrel_stats::autocorrelation;

#[test]
fn simulate_then_fit_round_trip() {
    let data = ar(&[0.6], 1000, 42);
    let fit = ArimaSpec::arma(1, 0).fit(&data).unwrap();

    let simulated = fit.simulate(1000, 1, &mut rng(123));
    let sim_data: Vec<f64> = simulated.column(0).to_vec();
    let refit = ArimaSpec::arma(1, 0).fit(&sim_data).unwrap();

    assert!(
        (refit.ar()[0] - fit.ar()[0]).abs() < 0.15,
        "Simulate-fit round trip: original phi={}, refit phi={}",
        fit.ar()[0],
        refit.ar()[0]
    );
}

#[test]
fn acf_structure_preserved() {
    let theta = 0.6;
    let data = ma(&[theta], 2000, 42);
    let fit = ArimaSpec::arma(0, 1).fit(&data).unwrap();

    let simulated = fit.simulate(5000, 1, &mut rng(456));
    let col = simulated.column(0).to_vec();
    let acf1 = autocorrelation(&col, 1).unwrap()[1];

    // Theoretical lag-1 ACF for MA(1): theta / (1 + theta^2)
    let theoretical_acf1 = theta / (1.0 + theta * theta);
    assert!(
        (acf1 - theoretical_acf1).abs() < 0.1,
        "ACF(1): expected ~{:.3}, got {:.3}",
        theoretical_acf1,
        acf1
    );
}

#[test]
fn simulated_paths_carry_fitted_mean() {
    let data: Vec<f64> = ar(&[0.3], 800, 9).iter().map(|x| x + 4.0).collect();
    let config = FitConfig::new().with_demean(true);
    let fit = ArimaSpec::arma(1, 0).fit_with(&data, &config).unwrap();
    let paths = fit.simulate(2000, 4, &mut rng(10));
    for column in paths.columns() {
        let mean = column.mean().unwrap();
        assert!((mean - fit.mean()).abs() < 0.15, "path mean = {mean}");
    }
}
