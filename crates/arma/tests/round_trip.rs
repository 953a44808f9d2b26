//! Round-trip integration tests for kestrel-arma maximum-likelihood fitting.

mod common;

use common::{ar, arma, ma, SERIES};
use kestrel_arma::{fit, select_best_aic, ArimaSpec, ArmaError, FitConfig, Termination};

#[test]
fn reference_series_ar1() {
    let fit = ArimaSpec::arma(1, 0).fit(&SERIES).unwrap();
    assert!(
        (fit.ar()[0] - 0.575).abs() < 1e-9,
        "AR(1) phi on reference series: got {}",
        fit.ar()[0]
    );
    assert_eq!(fit.iterations(), 7);
    assert!(fit.converged(), "termination = {}", fit.termination());
    assert!(fit.warning().is_none());
    assert!(!fit.at_boundary());
    assert_eq!(fit.mean(), 0.0);
}

#[test]
fn reference_series_centred() {
    let config = FitConfig::new().with_demean(true);
    let fit = ArimaSpec::arma(1, 0).fit_with(&SERIES, &config).unwrap();
    assert!((fit.mean() - 0.2040499841).abs() < 1e-9);
    assert!(
        (fit.ar()[0] - 0.5625).abs() < 1e-9,
        "centred AR(1) phi: got {}",
        fit.ar()[0]
    );
}

#[test]
fn ar1_recovery_rate() {
    let phi = 0.564;
    let hits = (0..20u64)
        .filter(|&seed| {
            let data = ar(&[phi], 3000, 1000 + seed);
            let fit = fit(&data, 1, 0).unwrap();
            (fit.ar()[0] - phi).abs() < 0.05
        })
        .count();
    assert!(hits >= 18, "phi recovered in only {hits} of 20 simulations");
}

#[test]
fn ma1_recovery() {
    let theta = 0.5;
    let data = ma(&[theta], 2000, 200);
    let fit = ArimaSpec::arma(0, 1).fit(&data).unwrap();
    assert!(
        (fit.ma()[0] - theta).abs() < 0.15,
        "MA(1) theta: expected ~{}, got {}",
        theta,
        fit.ma()[0]
    );
}

#[test]
fn arma11_recovery() {
    let phi = 0.5;
    let theta = 0.3;
    let data = arma(&[phi], &[theta], 2000, 300);
    let fit = ArimaSpec::arma(1, 1).fit(&data).unwrap();
    assert!(
        (fit.ar()[0] - phi).abs() < 0.15,
        "ARMA(1,1) phi: expected ~{}, got {}",
        phi,
        fit.ar()[0]
    );
    assert!(
        (fit.ma()[0] - theta).abs() < 0.15,
        "ARMA(1,1) theta: expected ~{}, got {}",
        theta,
        fit.ma()[0]
    );
    assert!(fit.sigma2() > 0.8 && fit.sigma2() < 1.2, "sigma2 = {}", fit.sigma2());
}

#[test]
fn raw_params_follow_order() {
    let data = arma(&[0.4], &[0.3], 600, 301);
    for (p, q) in [(1, 0), (0, 1), (1, 1), (2, 1)] {
        let fit = ArimaSpec::arma(p, q).fit(&data).unwrap();
        assert_eq!(fit.params().len(), p + q);
        assert_eq!(fit.params(), [fit.ar(), fit.ma()].concat().as_slice());
    }
}

#[test]
fn zero_order_is_rejected() {
    let data = ar(&[0.5], 100, 1);
    assert_eq!(
        fit(&data, 0, 0).unwrap_err(),
        ArmaError::InvalidOrder { p: 0, q: 0 }
    );
}

#[test]
fn integrated_series() {
    let increments = ar(&[0.5], 1500, 400);
    let level: Vec<f64> = increments
        .iter()
        .scan(100.0, |acc, x| {
            *acc += x;
            Some(*acc)
        })
        .collect();

    let fit = ArimaSpec::new(1, 1, 0).fit(&level).unwrap();
    assert_eq!(fit.spec().d(), 1);
    assert_eq!(fit.residuals().len(), level.len() - 1);
    assert!(
        (fit.ar()[0] - 0.5).abs() < 0.1,
        "ARIMA(1,1,0) phi: got {}",
        fit.ar()[0]
    );
}

#[test]
fn iteration_cap_is_never_exceeded() {
    // Near-unit-root data pushes the search into the infeasible region.
    let data = ar(&[0.95], 500, 500);
    for p in 0..=2 {
        for q in 0..=2 {
            if p + q == 0 {
                continue;
            }
            let fit = ArimaSpec::arma(p, q).fit(&data).unwrap();
            assert!(fit.iterations() <= 100, "({p},{q}): {}", fit.iterations());
            assert!(fit.log_likelihood().is_finite());
        }
    }

    let tight = FitConfig::new().with_max_iters(5).with_size_tolerance(1e-12);
    let fit = ArimaSpec::arma(2, 2).fit_with(&data, &tight).unwrap();
    assert_eq!(fit.iterations(), 5);
    assert_eq!(fit.termination(), &Termination::Stalled);
    assert_eq!(
        fit.warning(),
        Some(ArmaError::OptimizerStalled { iterations: 5 })
    );
}

#[test]
fn aic_selects_correct_order() {
    // AR(1) data: the search should prefer (1,0) or a close neighbour.
    let data = ar(&[0.7], 1000, 400);
    let best = select_best_aic(&data, 2, 2).unwrap();
    let (p, q) = best.order();
    assert!(
        p >= 1 && p + q <= 2,
        "Expected AR(1) or a one-term extension, got ({}, {})",
        p,
        q
    );
}
