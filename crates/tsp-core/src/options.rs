use std::{fmt, thread};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Visited sets are `u32` masks, so this is the hard upper bound regardless of
/// the configured ceiling.
pub const MAX_SUPPORTED_POINTS: usize = 31;

/// Largest instance accepted by default. Around 20 points the N^2 * 2^N table
/// is a few hundred MB.
pub const DEFAULT_MAX_POINTS: usize = 20;

const THREAD_FALLBACK_PARALLELISM: usize = 2;
const THREAD_RESERVED_CORES: usize = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Top-down recursion over a lazily filled memo table.
    #[default]
    Memoized,
    /// Bottom-up fill by decreasing visited-set size, one parallel pass per layer.
    Layered,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Memoized => f.write_str("memoized"),
            Strategy::Layered => f.write_str("layered"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    pub max_points: usize,
    pub strategy: Strategy,
    pub threads: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            strategy: Strategy::default(),
            threads: None,
        }
    }
}

impl SolverOptions {
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SUPPORTED_POINTS).contains(&self.max_points) {
            return Err(Error::invalid_input(format!(
                "max_points must be in 1..={MAX_SUPPORTED_POINTS}, got {}",
                self.max_points
            )));
        }
        if self.threads == Some(0) {
            return Err(Error::invalid_input("threads must be > 0"));
        }
        Ok(())
    }

    /// Resolved worker count for the layered strategy.
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(THREAD_FALLBACK_PARALLELISM)
                .saturating_sub(THREAD_RESERVED_CORES)
                .max(1)
        })
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_points={} strategy={} threads={}",
            self.max_points,
            self.strategy,
            self.threads()
        )
    }
}
