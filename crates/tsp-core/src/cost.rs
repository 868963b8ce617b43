use crate::Point;

/// Edge cost between two points. Implementations must return a non-negative,
/// non-NaN value; the matrix builder rejects anything else.
pub trait CostFunction {
    fn cost(&self, from: &Point, to: &Point) -> f64;
}

/// Straight-line distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl CostFunction for Euclidean {
    #[inline(always)]
    fn cost(&self, from: &Point, to: &Point) -> f64 {
        from.dist(to)
    }
}

/// L1 distance, for grid-like street layouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl CostFunction for Manhattan {
    #[inline(always)]
    fn cost(&self, from: &Point, to: &Point) -> f64 {
        (from.x - to.x).abs() + (from.y - to.y).abs()
    }
}

impl<F> CostFunction for F
where
    F: Fn(&Point, &Point) -> f64,
{
    fn cost(&self, from: &Point, to: &Point) -> f64 {
        self(from, to)
    }
}
