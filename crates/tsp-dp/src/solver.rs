use serde::Serialize;
use tsp_core::{DistanceMatrix, Error, Point, Result, SolverOptions, Strategy};

use crate::{context::SolveContext, layered, memoized};

/// Outcome of one solve, for callers that want more than the scalar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolveReport {
    pub cost: f64,
    pub points: usize,
    pub states_computed: usize,
    pub strategy: Strategy,
}

/// Exact minimum closed-tour solver. Tours always start and end at point 0.
#[derive(Clone, Debug, Default)]
pub struct TspSolver {
    options: SolverOptions,
}

impl TspSolver {
    pub fn new(options: SolverOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<f64> {
        self.solve_report(matrix).map(|report| report.cost)
    }

    pub fn solve_report(&self, matrix: &DistanceMatrix) -> Result<SolveReport> {
        let n = matrix.n();
        if n > self.options.max_points {
            return Err(Error::too_many_points(n, self.options.max_points));
        }

        let strategy = self.options.strategy;
        if strategy == Strategy::Memoized && self.options.threads.is_some() {
            log::warn!("solve: threads setting is ignored by the memoized strategy");
        }
        log::debug!("solve: start n={n} {}", self.options);

        let mut ctx = SolveContext::new(matrix)?;
        let cost = match strategy {
            Strategy::Memoized => memoized::evaluate(&mut ctx)?,
            Strategy::Layered => layered::evaluate(&mut ctx, self.options.threads())?,
        };

        if !cost.is_finite() {
            return Err(Error::internal(format!(
                "optimal tour cost for {n} points is {cost} after full evaluation"
            )));
        }

        let states_computed = ctx.memo.computed();
        log::debug!("solve: done n={n} cost={cost} states={states_computed}");

        Ok(SolveReport {
            cost,
            points: n,
            states_computed,
            strategy,
        })
    }

    pub fn solve_points(&self, points: &[Point]) -> Result<f64> {
        if points.len() > self.options.max_points {
            return Err(Error::too_many_points(points.len(), self.options.max_points));
        }
        self.solve(&DistanceMatrix::from_points(points)?)
    }
}

/// Minimum tour cost with default options.
pub fn solve(matrix: &DistanceMatrix) -> Result<f64> {
    TspSolver::default().solve(matrix)
}

/// Builds the Euclidean matrix for `points` and solves it.
pub fn solve_points(points: &[Point], options: &SolverOptions) -> Result<f64> {
    TspSolver::new(options.clone())?.solve_points(points)
}
