use tsp_core::{Error, Result};

/// Cost-to-go per `(position, visited)` state.
///
/// Indexed as `pos * 2^n + visited`. `None` means the state has not been
/// computed yet; once set, an entry never changes for the lifetime of the table.
pub struct MemoTable {
    entries: Vec<Option<f64>>,
    n: usize,
    computed: usize,
}

impl MemoTable {
    pub fn new(n: usize) -> Result<Self> {
        let size = 1usize
            .checked_shl(n as u32)
            .and_then(|states| states.checked_mul(n))
            .ok_or_else(|| Error::allocation_failed(n, usize::MAX))?;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(size)
            .map_err(|_| Error::allocation_failed(n, size))?;
        entries.resize(size, None);

        Ok(Self {
            entries,
            n,
            computed: 0,
        })
    }

    #[inline(always)]
    fn index(&self, pos: usize, visited: u32) -> usize {
        (pos << self.n) + visited as usize
    }

    #[inline(always)]
    pub fn get(&self, pos: usize, visited: u32) -> Option<f64> {
        self.entries[self.index(pos, visited)]
    }

    /// Stores a computed state. Setting an already computed state is a defect
    /// in the caller's evaluation order.
    pub fn set(&mut self, pos: usize, visited: u32, cost: f64) -> Result<()> {
        let idx = self.index(pos, visited);
        let slot = &mut self.entries[idx];
        if slot.is_some() {
            return Err(Error::internal(format!(
                "state (pos={pos}, visited={visited:#b}) computed twice"
            )));
        }
        *slot = Some(cost);
        self.computed += 1;
        Ok(())
    }

    /// Number of states stored so far.
    pub fn computed(&self) -> usize {
        self.computed
    }
}
