//! Simplex maximum-likelihood optimizer for ARMA estimation.
//!
//! Minimises the negated Kalman log-likelihood over the raw `(phi, theta)`
//! vector with a Nelder-Mead simplex search run through `argmin`.
//!
//! The search starts at the zero vector with one vertex offset per
//! coordinate, stops once the mean vertex-to-centroid distance drops below
//! the size tolerance or the iteration cap is reached, and stops early with
//! the best vertex so far if an evaluation fails numerically.
//!
//! **Not part of the public API.**

use argmin::core::{
    CostFunction, Error, Executor, IterState, Problem, Solver, State, TerminationReason,
    TerminationStatus, KV,
};
use tracing::{debug, warn};

use crate::config::FitConfig;
use crate::error::ArmaError;
use crate::fit::{ArmaFit, Termination};
use crate::kalman::KalmanEvaluator;
use crate::spec::ArimaSpec;
use crate::validation::{check_order, check_series};

type SimplexState = IterState<Vec<f64>, (), (), (), (), f64>;

/// Fits an ARIMA(p,d,q) model to data via exact MLE.
///
/// This is the full pipeline:
/// 1. Validate order, data and configuration
/// 2. Difference `d` times
/// 3. Center (subtract mean) unless disabled
/// 4. Minimise the negated log-likelihood via the simplex search
/// 5. Re-run the Kalman filter at the optimum for sigma2, residuals, AIC
pub(crate) fn fit_arma(
    spec: ArimaSpec,
    config: &FitConfig,
    data: &[f64],
) -> Result<ArmaFit, ArmaError> {
    let (p, q) = (spec.p(), spec.q());

    // 1. Validate
    check_order(p, q)?;
    check_series(data)?;
    config.validate()?;

    // 2. Difference
    let differenced = if spec.d() > 0 {
        kestrel_stats::difference(data, spec.d())?
    } else {
        data.to_vec()
    };
    let min_len = p.max(q).max(1) + 1;
    if differenced.len() < min_len {
        return Err(ArmaError::InsufficientData {
            n: differenced.len(),
            min: min_len,
        });
    }

    // 3. Optionally centre
    let mean = if config.demean() {
        kestrel_stats::mean(&differenced)
    } else {
        0.0
    };
    let centered: Vec<f64> = differenced.iter().map(|x| x - mean).collect();

    // 4. Optimise
    let cost = ArmaCost {
        data: &centered,
        p,
        q,
        evaluator: KalmanEvaluator::new(),
    };
    let solver = SimplexSearch::new(config.initial_step(), config.size_tolerance());
    let result = Executor::new(cost, solver)
        .configure(|state| state.param(vec![0.0; p + q]).max_iters(config.max_iters()))
        .run()
        .map_err(into_arma_error)?;

    let state = result.state();
    let iterations = state.get_iter();
    let best = state
        .get_best_param()
        .or_else(|| state.get_param())
        .cloned()
        .ok_or_else(|| ArmaError::OptimizationFailed("no parameter vector evaluated".into()))?;
    let termination = match state.get_termination_reason() {
        Some(TerminationReason::SolverConverged) => Termination::Converged,
        Some(TerminationReason::MaxItersReached) => Termination::Stalled,
        Some(TerminationReason::SolverExit(reason)) => Termination::Aborted {
            reason: reason.clone(),
        },
        Some(other) => Termination::Aborted {
            reason: format!("{other:?}"),
        },
        None => Termination::Aborted {
            reason: "search did not terminate".into(),
        },
    };

    match &termination {
        Termination::Converged => debug!(iterations, ?best, "simplex converged"),
        Termination::Stalled => warn!(
            iterations,
            ?best,
            "simplex reached the iteration cap without converging"
        ),
        Termination::Aborted { reason } => warn!(
            iterations,
            ?best,
            reason = reason.as_str(),
            "simplex aborted, keeping best point so far"
        ),
    }

    // 5. Final Kalman pass at the optimum
    let run = KalmanEvaluator::new()
        .evaluate_checked(&best, &centered, p, q)?
        .into_result()?;

    Ok(ArmaFit::new(spec, best, run, mean, iterations, termination))
}

fn into_arma_error(err: Error) -> ArmaError {
    match err.downcast::<ArmaError>() {
        Ok(arma) => arma,
        Err(other) => ArmaError::OptimizationFailed(other.to_string()),
    }
}

/// Cost function for argmin: negated log-likelihood, or the infeasibility
/// penalty outside the admissible region.
struct ArmaCost<'a> {
    data: &'a [f64],
    p: usize,
    q: usize,
    evaluator: KalmanEvaluator,
}

impl CostFunction for ArmaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, Error> {
        self.evaluator
            .evaluate_checked(params, self.data, self.p, self.q)
            .map(|eval| eval.objective())
            .map_err(Error::new)
    }
}

#[derive(Clone, Debug)]
struct Vertex {
    x: Vec<f64>,
    f: f64,
}

/// Nelder-Mead simplex search over `Vec<f64>`.
///
/// Moves are expressed as `corner(c, h) = (1 - c) * centroid + c * x_h`,
/// where the centroid excludes the worst vertex `h`: reflection is `c = -1`,
/// expansion `c = -2` and contraction `c = 0.5`. A failed contraction
/// shrinks every vertex halfway towards the best one.
#[derive(Clone, Debug)]
pub(crate) struct SimplexSearch {
    step: f64,
    tolerance: f64,
    vertices: Vec<Vertex>,
    abort: Option<String>,
}

impl SimplexSearch {
    pub(crate) fn new(step: f64, tolerance: f64) -> Self {
        Self {
            step,
            tolerance,
            vertices: Vec::new(),
            abort: None,
        }
    }

    /// Indices of the lowest, second-highest and highest vertices.
    fn ranks(&self) -> (usize, usize, usize) {
        let mut order: Vec<usize> = (0..self.vertices.len()).collect();
        order.sort_by(|&a, &b| self.vertices[a].f.total_cmp(&self.vertices[b].f));
        let n = order.len();
        (order[0], order[n.saturating_sub(2)], order[n - 1])
    }

    fn corner(&self, coeff: f64, worst: usize) -> Vec<f64> {
        let dim = self.vertices[worst].x.len();
        let others = (self.vertices.len() - 1) as f64;
        let mut centroid = vec![0.0; dim];
        for (i, v) in self.vertices.iter().enumerate() {
            if i != worst {
                for (c, x) in centroid.iter_mut().zip(&v.x) {
                    *c += x / others;
                }
            }
        }
        centroid
            .iter()
            .zip(&self.vertices[worst].x)
            .map(|(c, x)| (1.0 - coeff) * c + coeff * x)
            .collect()
    }

    /// Mean Euclidean distance of the vertices from their centroid.
    fn size(&self) -> f64 {
        let Some(first) = self.vertices.first() else {
            return 0.0;
        };
        let n = self.vertices.len() as f64;
        let mut centroid = vec![0.0; first.x.len()];
        for v in &self.vertices {
            for (c, x) in centroid.iter_mut().zip(&v.x) {
                *c += x / n;
            }
        }
        self.vertices
            .iter()
            .map(|v| {
                v.x.iter()
                    .zip(&centroid)
                    .map(|(x, c)| (x - c).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .sum::<f64>()
            / n
    }

    fn best(&self) -> Option<&Vertex> {
        self.vertices.iter().min_by(|a, b| a.f.total_cmp(&b.f))
    }

    /// Evaluates `x`; on failure records the reason and returns `None`.
    fn evaluate<O>(&mut self, problem: &mut Problem<O>, x: &[f64]) -> Option<f64>
    where
        O: CostFunction<Param = Vec<f64>, Output = f64>,
    {
        match problem.cost(&x.to_vec()) {
            Ok(f) => Some(f),
            Err(err) => {
                self.abort = Some(err.to_string());
                None
            }
        }
    }

    fn replace(&mut self, index: usize, x: Vec<f64>, f: f64) {
        self.vertices[index] = Vertex { x, f };
    }

    /// Shrinks every vertex halfway towards `best`.
    fn shrink<O>(&mut self, problem: &mut Problem<O>, best: usize) -> Option<()>
    where
        O: CostFunction<Param = Vec<f64>, Output = f64>,
    {
        let anchor = self.vertices[best].x.clone();
        for i in 0..self.vertices.len() {
            if i == best {
                continue;
            }
            let x: Vec<f64> = self.vertices[i]
                .x
                .iter()
                .zip(&anchor)
                .map(|(x, a)| 0.5 * (x + a))
                .collect();
            let f = self.evaluate(problem, &x)?;
            self.replace(i, x, f);
        }
        Some(())
    }

    /// One reflect/expand/contract/shrink step. `None` if an evaluation failed.
    fn iterate<O>(&mut self, problem: &mut Problem<O>) -> Option<()>
    where
        O: CostFunction<Param = Vec<f64>, Output = f64>,
    {
        let (lo, second, hi) = self.ranks();
        let (f_lo, f_second, f_hi) = (
            self.vertices[lo].f,
            self.vertices[second].f,
            self.vertices[hi].f,
        );

        let reflected = self.corner(-1.0, hi);
        let f_r = self.evaluate(problem, &reflected)?;

        if f_r < f_lo {
            let expanded = self.corner(-2.0, hi);
            let f_e = self.evaluate(problem, &expanded)?;
            if f_e < f_lo {
                self.replace(hi, expanded, f_e);
            } else {
                self.replace(hi, reflected, f_r);
            }
        } else if f_r > f_second {
            if f_r <= f_hi {
                self.replace(hi, reflected, f_r);
            }
            let contracted = self.corner(0.5, hi);
            let f_c = self.evaluate(problem, &contracted)?;
            if f_c <= self.vertices[hi].f {
                self.replace(hi, contracted, f_c);
            } else {
                self.shrink(problem, lo)?;
            }
        } else {
            self.replace(hi, reflected, f_r);
        }
        Some(())
    }

    fn with_best(&self, state: SimplexState) -> SimplexState {
        match self.best() {
            Some(v) => state.param(v.x.clone()).cost(v.f),
            None => state,
        }
    }

    fn aborted(&self, state: SimplexState) -> SimplexState {
        let reason = self
            .abort
            .clone()
            .unwrap_or_else(|| "numerical failure".into());
        self.with_best(state)
            .terminate_with(TerminationReason::SolverExit(reason))
    }
}

impl<O> Solver<O, SimplexState> for SimplexSearch
where
    O: CostFunction<Param = Vec<f64>, Output = f64>,
{
    const NAME: &'static str = "Simplex search";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: SimplexState,
    ) -> Result<(SimplexState, Option<KV>), Error> {
        let x0 = state
            .take_param()
            .ok_or_else(|| Error::msg("simplex search needs an initial parameter vector"))?;

        // Failure at the starting point leaves nothing to fall back on.
        let f0 = problem.cost(&x0)?;
        self.vertices = vec![Vertex { x: x0.clone(), f: f0 }];
        for i in 0..x0.len() {
            let mut x = x0.clone();
            x[i] += self.step;
            let Some(f) = self.evaluate(problem, &x) else {
                return Ok((self.aborted(state), None));
            };
            self.vertices.push(Vertex { x, f });
        }
        Ok((self.with_best(state), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        state: SimplexState,
    ) -> Result<(SimplexState, Option<KV>), Error> {
        if self.abort.is_some() || self.iterate(problem).is_none() {
            return Ok((self.aborted(state), None));
        }
        Ok((self.with_best(state), None))
    }

    fn terminate(&mut self, _state: &SimplexState) -> TerminationStatus {
        if let Some(reason) = &self.abort {
            return TerminationStatus::Terminated(TerminationReason::SolverExit(reason.clone()));
        }
        if self.size() < self.tolerance {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}
