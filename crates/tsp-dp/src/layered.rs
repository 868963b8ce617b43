use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use tsp_core::{DistanceMatrix, Error, Result};

use crate::context::{positions, unvisited, SolveContext, START, START_MASK};
use crate::memo::MemoTable;

/// Layers smaller than this are evaluated on the calling thread.
const PARALLEL_MIN_MASKS: usize = 64;

type Computed = Vec<(usize, u32, f64)>;

/// Bottom-up evaluation. Visited sets are grouped by size and filled from
/// N-1 points down to the start set; a layer only reads layers with more
/// points, which are complete before it begins.
pub fn evaluate(ctx: &mut SolveContext, threads: usize) -> Result<f64> {
    if ctx.full_mask == START_MASK {
        return Ok(ctx.return_leg(START));
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::ResourceExhausted(format!("rayon pool: {e}")))?;
    let layers = layers_by_size(ctx.n, ctx.full_mask);

    for (size, masks) in layers.iter().enumerate().rev() {
        if masks.is_empty() {
            continue;
        }
        log::trace!("layered: size={size} masks={}", masks.len());

        for (pos, visited, cost) in evaluate_layer(ctx, &pool, masks)? {
            ctx.memo.set(pos, visited, cost)?;
        }
    }

    ctx.memo
        .get(START, START_MASK)
        .ok_or_else(|| Error::internal("start state was never evaluated"))
}

/// Every non-full visited set that contains the start, indexed by popcount.
fn layers_by_size(n: usize, full_mask: u32) -> Vec<Vec<u32>> {
    let mut layers = vec![Vec::new(); n];
    for rest in 0..(1u32 << (n - 1)) {
        let mask = (rest << 1) | START_MASK;
        if mask != full_mask {
            layers[mask.count_ones() as usize].push(mask);
        }
    }
    layers
}

fn evaluate_layer(ctx: &SolveContext, pool: &ThreadPool, masks: &[u32]) -> Result<Computed> {
    let (matrix, memo, full_mask) = (ctx.matrix, &ctx.memo, ctx.full_mask);
    let threads = pool.current_num_threads();

    if threads <= 1 || masks.len() < PARALLEL_MIN_MASKS {
        return evaluate_chunk(matrix, memo, full_mask, masks);
    }

    // Chunks are disjoint mask ranges; the end of the collect is the layer barrier.
    let chunk_size = masks.len().div_ceil(threads);
    let batches = pool.install(|| {
        masks
            .par_chunks(chunk_size)
            .map(|chunk| evaluate_chunk(matrix, memo, full_mask, chunk))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(batches.into_iter().flatten().collect())
}

fn evaluate_chunk(
    matrix: &DistanceMatrix,
    memo: &MemoTable,
    full_mask: u32,
    masks: &[u32],
) -> Result<Computed> {
    let n = matrix.n();
    let mut out = Vec::new();

    for &visited in masks {
        for pos in positions(visited, n) {
            let mut best = f64::INFINITY;
            for city in unvisited(visited, n) {
                let next = visited | (1 << city);
                let rest = if next == full_mask {
                    matrix.get(city, START)
                } else {
                    memo.get(city, next).ok_or_else(|| {
                        Error::internal(format!(
                            "state (pos={city}, visited={next:#b}) read before it was computed"
                        ))
                    })?
                };
                best = best.min(matrix.get(pos, city) + rest);
            }
            out.push((pos, visited, best));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_hold_every_non_full_set_with_the_start() {
        let layers = layers_by_size(4, 0b1111);
        assert!(layers[0].is_empty());
        assert_eq!(layers[1], vec![0b0001]);
        assert_eq!(layers[2], vec![0b0011, 0b0101, 0b1001]);
        assert_eq!(layers[3], vec![0b0111, 0b1011, 0b1101]);
        assert!(layers.iter().flatten().all(|m| m & START_MASK != 0));
    }

    #[test]
    fn single_point_is_already_terminal() {
        let m = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        let mut ctx = SolveContext::new(&m).unwrap();
        assert_eq!(evaluate(&mut ctx, 4).unwrap(), 0.0);
        assert_eq!(ctx.memo.computed(), 0);
    }

    #[test]
    fn asymmetric_triangle_picks_the_cheaper_direction() {
        // 0 -> 1 -> 2 -> 0 costs 3; 0 -> 2 -> 1 -> 0 costs 30
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 10.0],
            vec![10.0, 0.0, 1.0],
            vec![1.0, 10.0, 0.0],
        ])
        .unwrap();
        let mut ctx = SolveContext::new(&m).unwrap();
        assert_eq!(evaluate(&mut ctx, 1).unwrap(), 3.0);
    }

    #[test]
    fn pooled_layers_match_the_single_thread_fill() {
        let n = 10;
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { ((i * 7 + j * 3) % 11 + 1) as f64 })
                    .collect()
            })
            .collect();
        let m = DistanceMatrix::from_rows(rows).unwrap();

        let mut single = SolveContext::new(&m).unwrap();
        let mut pooled = SolveContext::new(&m).unwrap();
        let expected = evaluate(&mut single, 1).unwrap();

        assert_eq!(evaluate(&mut pooled, 4).unwrap(), expected);
        assert_eq!(pooled.memo.computed(), single.memo.computed());
    }
}
