//! # kestrel-arma
//!
//! ARMA(p,q) / ARIMA(p,d,q) estimation via exact state-space
//! maximum-likelihood (Kalman filter), plus the closed-form Yule-Walker and
//! Levinson-Durbin estimators and the partial autocorrelation function.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["ArimaSpec::new(p, d, q)"] -->|".fit(&data)?"| B["ArmaFit"]
//!     B --> C[".ar(): AR coefficients"]
//!     B --> D[".ma(): MA coefficients"]
//!     B --> E[".sigma2(): innovation variance"]
//!     B --> F[".aic(): Akaike Information Criterion"]
//!     B --> G[".simulate(n, n_sim, &mut rng)"]
//!     H["select_best_aic(&data, max_p, max_q)?"] -->|"grid search"| B
//! ```
//!
//! ## Usage Paths
//!
//! **Maximum likelihood** (known orders):
//! ```ignore
//! let fit = ArimaSpec::arma(2, 1).fit(&data)?;
//! if let Some(warning) = fit.warning() {
//!     eprintln!("{warning}");
//! }
//! ```
//!
//! **AIC grid search** (unknown orders):
//! ```ignore
//! let fit = select_best_aic(&data, 2, 2)?;
//! ```
//!
//! **Closed-form estimates**:
//! ```ignore
//! let yw = yule_walker(&data, 2)?;
//! let ld = levinson_durbin(&data, 10)?;
//! let partial = pacf(&data, None, PacfMethod::LevinsonDurbin)?;
//! ```
//!
//! **Direct likelihood evaluation**:
//! ```ignore
//! match log_likelihood(&[0.2], &data, 1, 0)? {
//!     Evaluation::Feasible(run) => println!("logL = {}", run.log_likelihood()),
//!     Evaluation::Infeasible => println!("outside the admissible region"),
//! }
//! ```
//!
//! ## Feasible Region
//!
//! A parameter vector is admissible when the absolute AR coefficients sum to
//! at most 1 and the absolute MA coefficients sum to at most 1. This is
//! sufficient but not necessary for stationarity and invertibility, so some
//! valid models (e.g. AR(2) with `phi = [1.2, -0.4]`) are rejected.
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`ArmaFit::ar()`] | AR coefficients: weights on past observations |
//! | theta | [`ArmaFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | sigma2 | [`ArmaFit::sigma2()`] | Innovation (white-noise) variance |
//! | v_t | [`ArmaFit::residuals()`] | One-step-ahead prediction errors |
//! | AIC | [`ArmaFit::aic()`] | Akaike Information Criterion (lower = better) |
//! | PACF | [`pacf()`] | Partial autocorrelation by lag |

mod config;
mod error;
mod fit;
mod kalman;
mod levinson;
mod linalg;
mod pacf;
mod selection;
mod spec;
mod state_space;
mod yule_walker;

pub mod simulate;

pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod validation;

pub use config::FitConfig;
pub use error::ArmaError;
pub use fit::{ArmaFit, Termination};
pub use kalman::{log_likelihood, Evaluation, KalmanEvaluator, KalmanRunResult};
pub use levinson::{levinson_durbin, levinson_durbin_from_autocovariance, LevinsonDurbin};
pub use linalg::{solve_toeplitz, toeplitz};
pub use pacf::{default_max_lags, pacf, PacfMethod};
pub use selection::select_best_aic;
pub use spec::{fit, ArimaSpec};
pub use state_space::StateSpace;
pub use yule_walker::{yule_walker, YuleWalker, YuleWalkerEstimator};

pub use kestrel_stats::{difference, Denominator, StatsError};
