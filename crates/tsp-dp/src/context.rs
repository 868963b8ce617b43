use tsp_core::{DistanceMatrix, Result};

use crate::memo::MemoTable;

/// Start and end of every tour.
pub const START: usize = 0;
pub const START_MASK: u32 = 1 << START;

/// State of one solve call. Owns its memo table; nothing here outlives the call.
pub struct SolveContext<'a> {
    pub matrix: &'a DistanceMatrix,
    pub n: usize,
    pub full_mask: u32,
    pub memo: MemoTable,
}

impl<'a> SolveContext<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Result<Self> {
        let n = matrix.n();
        let memo = MemoTable::new(n)?;

        Ok(SolveContext {
            matrix,
            n,
            full_mask: ((1u64 << n) - 1) as u32,
            memo,
        })
    }

    /// Cost of finishing from `pos` once every point is in `visited`.
    #[inline(always)]
    pub fn return_leg(&self, pos: usize) -> f64 {
        self.matrix.get(pos, START)
    }
}

/// Points in `visited` that a tour can currently be standing on.
/// Only the start state `{START}` sits at `START`; every larger set ends on the
/// most recently added point, which is never the start.
pub fn positions(visited: u32, n: usize) -> impl Iterator<Item = usize> {
    (0..n).filter(move |&pos| {
        visited & (1 << pos) != 0 && (pos != START || visited == START_MASK)
    })
}

/// Points not yet in `visited`.
pub fn unvisited(visited: u32, n: usize) -> impl Iterator<Item = usize> {
    (0..n).filter(move |&city| visited & (1 << city) == 0)
}
