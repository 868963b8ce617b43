use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CostFunction, Error, Euclidean, Point, Result};

/// Square, zero-diagonal, non-negative cost table.
///
/// Every constructor validates its input, so a `DistanceMatrix` value is always
/// well formed. Rows passed to `from_rows` may use `+inf` to mark an unusable
/// edge; costs computed from points must be finite. NaN is always rejected.
/// Symmetry is not required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    // Flattened row-major for cache locality
    data: Vec<f64>,
    n: usize,
}

impl DistanceMatrix {
    /// Euclidean matrix over `points`.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        Self::build_with(points, &Euclidean)
    }

    pub fn build_with<C>(points: &[Point], cost_fn: &C) -> Result<Self>
    where
        C: CostFunction + ?Sized,
    {
        let n = points.len();
        if n == 0 {
            return Err(Error::invalid_input("point set is empty"));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::invalid_input(format!(
                "point {i} has a non-finite coordinate: {}",
                points[i]
            )));
        }

        let mut data = vec![0.0; n * n];
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate() {
                if i != j {
                    let cost = cost_fn.cost(from, to);
                    if !cost.is_finite() {
                        return Err(Error::invalid_input(format!(
                            "cost from point {i} to point {j} is not finite: {cost}"
                        )));
                    }
                    data[i * n + j] = cost;
                }
            }
        }

        let matrix = Self { data, n };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Takes a pre-computed matrix, e.g. road-network costs.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::invalid_input("distance matrix is empty"));
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_input(format!(
                    "distance matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        let matrix = Self { data, n };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<()> {
        for i in 0..self.n {
            for j in 0..self.n {
                let value = self.get(i, j);
                if value.is_nan() {
                    return Err(Error::invalid_input(format!("entry ({i}, {j}) is NaN")));
                }
                if value < 0.0 {
                    return Err(Error::invalid_input(format!(
                        "entry ({i}, {j}) is negative: {value}"
                    )));
                }
                if i == j && value != 0.0 {
                    return Err(Error::invalid_input(format!(
                        "diagonal entry ({i}, {i}) must be 0, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline(always)]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n)
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n).all(|i| {
            (i + 1..self.n).all(|j| {
                let (a, b) = (self.get(i, j), self.get(j, i));
                a == b || (a - b).abs() <= tolerance
            })
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line = row
                .iter()
                .map(|v| format!("{v:.3}"))
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
