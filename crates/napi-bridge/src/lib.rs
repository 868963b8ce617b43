#![deny(clippy::all)]

use napi_derive::napi;
use tsp_core::{DistanceMatrix, Point};
use tsp_dp::TspSolver;

mod models;

use models::{Coordinate, SolveOptions};

fn to_napi(err: tsp_core::Error) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

fn solver(options: Option<SolveOptions>) -> tsp_core::Result<TspSolver> {
    TspSolver::new(options.unwrap_or_default().into_solver_options()?)
}

/// Minimum closed-tour cost over Euclidean distances between `points`.
#[napi]
pub fn solve_points(points: Vec<Coordinate>, options: Option<SolveOptions>) -> napi::Result<f64> {
    let points: Vec<Point> = points.into_iter().map(Point::from).collect();
    solver(options)
        .and_then(|s| s.solve_points(&points))
        .map_err(to_napi)
}

/// Minimum closed-tour cost over a caller-supplied cost matrix.
#[napi]
pub fn solve_matrix(rows: Vec<Vec<f64>>, options: Option<SolveOptions>) -> napi::Result<f64> {
    solver(options)
        .and_then(|s| s.solve(&DistanceMatrix::from_rows(rows)?))
        .map_err(to_napi)
}
