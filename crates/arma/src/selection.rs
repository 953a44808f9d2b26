//! AIC-based ARMA model order selection.

use rayon::prelude::*;
use tracing::debug;

use crate::error::ArmaError;
use crate::fit::ArmaFit;
use crate::spec::ArimaSpec;

/// Selects the best ARMA(p,q) model from a grid search over orders
/// 0..=`max_p` and 0..=`max_q`, ranked by Akaike Information Criterion
/// (AIC).
///
/// Fits every candidate `(p, q)` except `(0, 0)` via [`ArimaSpec::fit()`]
/// in parallel, collects those that succeed, and returns the [`ArmaFit`]
/// with the lowest [`ArmaFit::aic()`]. Candidates that fail to fit are
/// skipped. Ties go to the candidate with the smaller `p`, then `q`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArmaError::AllCandidatesFailed`] | every `(p, q)` combination failed to fit, or the grid is empty |
///
/// # Example
///
/// ```
/// use kestrel_arma::{select_best_aic, simulate};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(8);
/// let data = simulate::ar(600, &[0.6], 1.0, &mut rng).unwrap();
/// let best = select_best_aic(&data, 2, 1).unwrap();
/// assert!(best.aic().is_finite());
/// ```
#[tracing::instrument(skip(data), fields(n = data.len()))]
pub fn select_best_aic(data: &[f64], max_p: usize, max_q: usize) -> Result<ArmaFit, ArmaError> {
    let candidates: Vec<(usize, usize)> = (0..=max_p)
        .flat_map(|p| (0..=max_q).map(move |q| (p, q)))
        .filter(|&(p, q)| p + q > 0)
        .collect();

    let fits: Vec<ArmaFit> = candidates
        .par_iter()
        .filter_map(|&(p, q)| match ArimaSpec::arma(p, q).fit(data) {
            Ok(fit) => Some(fit),
            Err(err) => {
                debug!(p, q, error = %err, "candidate skipped");
                None
            }
        })
        .collect();

    let best = fits
        .into_iter()
        .min_by(|a, b| a.aic().total_cmp(&b.aic()))
        .ok_or(ArmaError::AllCandidatesFailed { max_p, max_q })?;
    debug!(order = %best.spec(), aic = best.aic(), "selected");
    Ok(best)
}
