//! Shared types for the exact TSP solver.
//! Points, pluggable edge costs, validated distance matrices, errors and options.

#![deny(clippy::all)]

mod cost;
mod error;
mod matrix;
mod options;
mod point;

pub use cost::{CostFunction, Euclidean, Manhattan};
pub use error::{Error, Result};
pub use matrix::DistanceMatrix;
pub use options::{SolverOptions, Strategy, DEFAULT_MAX_POINTS, MAX_SUPPORTED_POINTS};
pub use point::Point;
