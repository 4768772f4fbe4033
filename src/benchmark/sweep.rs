//! Sweep state shared by the dataset generators.

use super::dataset::Dataset;
use crate::error::{SimError, Result};

/// Forward-only cursor over a fixed number of sweep positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    position: usize,
    len: usize,
}

impl Sweep {
    /// Create a cursor at position 0 over `len` positions.
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    /// Next position to be produced.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of positions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Positions not yet produced.
    pub fn remaining(&self) -> usize {
        self.len - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.len
    }

    /// Take the current position and move past it.
    pub fn step(&mut self) -> Result<usize> {
        self.check(self.position)?;
        let current = self.position;
        self.position += 1;
        Ok(current)
    }

    /// Fail with `SweepExhausted` if `position` lies beyond the sweep.
    pub fn check(&self, position: usize) -> Result<()> {
        if position >= self.len {
            return Err(SimError::SweepExhausted {
                position,
                len: self.len,
            });
        }
        Ok(())
    }
}

/// A parameter sweep that produces one dataset per position.
///
/// Each dataset depends only on its position and the construction
/// parameters, so `dataset_at` is pure and `advance` is `dataset_at` on the
/// cursor's current position.
pub trait DatasetGenerator {
    /// Cursor over the sweep.
    fn sweep(&self) -> &Sweep;

    /// Mutable cursor over the sweep.
    fn sweep_mut(&mut self) -> &mut Sweep;

    /// Build the dataset for a given position without moving the cursor.
    fn dataset_at(&self, position: usize) -> Result<Dataset>;

    /// Number of datasets the sweep produces.
    fn n_positions(&self) -> usize {
        self.sweep().len()
    }

    /// Position of the next dataset.
    fn next_position(&self) -> usize {
        self.sweep().position()
    }

    /// Produce the next dataset, or `SweepExhausted` once every position
    /// has been produced.
    fn advance(&mut self) -> Result<Dataset> {
        let position = self.sweep_mut().step()?;
        self.dataset_at(position)
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
///
/// With `n == 1` the single value is `start`. The last value is exactly
/// `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Integer count at `position` of `len` evenly spaced steps from `start` to
/// `stop`, rounded down.
pub(crate) fn stepped_count(start: usize, stop: usize, position: usize, len: usize) -> usize {
    if len <= 1 {
        return start;
    }
    start + (stop - start) * position / (len - 1)
}

/// Iterator plumbing shared by the concrete generators.
macro_rules! impl_dataset_iterator {
    ($generator:ty) => {
        impl Iterator for $generator {
            type Item = $crate::error::Result<$crate::benchmark::Dataset>;

            fn next(&mut self) -> Option<Self::Item> {
                use $crate::benchmark::DatasetGenerator;
                if self.sweep().is_exhausted() {
                    return None;
                }
                Some(self.advance())
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                use $crate::benchmark::DatasetGenerator;
                let remaining = self.sweep().remaining();
                (remaining, Some(remaining))
            }
        }

        impl ExactSizeIterator for $generator {}
    };
}

pub(crate) use impl_dataset_iterator;
