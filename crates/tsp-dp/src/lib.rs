//! Exact Travelling Salesman solver over bitmask-encoded visited sets.
//!
//! A state is `(pos, visited)`: standing on `pos` with the points in `visited`
//! already toured. Its value is the cheapest way to visit everything else and
//! return to point 0:
//!
//! ```text
//! cost(pos, full)    = d(pos, 0)
//! cost(pos, visited) = min over c not in visited of d(pos, c) + cost(c, visited | c)
//! ```
//!
//! The answer is `cost(0, {0})`. Time is O(N^2 * 2^N) and the memo table holds
//! N * 2^N entries, so instances are capped by [`SolverOptions::max_points`].
//!
//! Two drivers fill the same table: [`Strategy::Memoized`] recurses top-down,
//! [`Strategy::Layered`] fills visited sets by decreasing size, spreading each
//! layer over worker threads.

#![deny(clippy::all)]

mod context;
mod layered;
mod memo;
mod memoized;
mod solver;

pub use solver::{solve, solve_points, SolveReport, TspSolver};
pub use tsp_core::{
    DistanceMatrix, Error, Point, Result, SolverOptions, Strategy, DEFAULT_MAX_POINTS,
};
