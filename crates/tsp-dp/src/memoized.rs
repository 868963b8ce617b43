use tsp_core::Result;

use crate::context::{unvisited, SolveContext, START, START_MASK};

/// Top-down evaluation from the start state. Recursion depth is at most N, and
/// every transition strictly grows `visited`, so no state depends on itself.
pub fn evaluate(ctx: &mut SolveContext) -> Result<f64> {
    cost(ctx, START, START_MASK)
}

fn cost(ctx: &mut SolveContext, pos: usize, visited: u32) -> Result<f64> {
    if visited == ctx.full_mask {
        return Ok(ctx.return_leg(pos));
    }

    if let Some(cached) = ctx.memo.get(pos, visited) {
        return Ok(cached);
    }

    let mut best = f64::INFINITY;
    for city in unvisited(visited, ctx.n) {
        let leg = ctx.matrix.get(pos, city);
        let candidate = leg + cost(ctx, city, visited | (1 << city))?;
        best = best.min(candidate);
    }

    ctx.memo.set(pos, visited, best)?;
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::{DistanceMatrix, Point};

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn unit_square_takes_the_perimeter() {
        let m = square();
        let mut ctx = SolveContext::new(&m).unwrap();
        assert!((evaluate(&mut ctx).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn memoized_states_answer_repeat_queries() {
        let m = square();
        let mut ctx = SolveContext::new(&m).unwrap();
        evaluate(&mut ctx).unwrap();

        let computed = ctx.memo.computed();
        let first = cost(&mut ctx, 1, 0b0011).unwrap();
        let second = cost(&mut ctx, 1, 0b0011).unwrap();
        assert_eq!(first, second);
        assert_eq!(ctx.memo.get(1, 0b0011), Some(first));
        assert_eq!(ctx.memo.computed(), computed);
    }

    #[test]
    fn terminal_state_returns_the_leg_home() {
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![7.0, 0.0, 3.0],
            vec![5.0, 4.0, 0.0],
        ])
        .unwrap();
        let mut ctx = SolveContext::new(&m).unwrap();
        assert_eq!(cost(&mut ctx, 2, 0b111).unwrap(), 5.0);
        assert_eq!(ctx.memo.computed(), 0);
    }
}
