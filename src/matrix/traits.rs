//! The contract shared by every sparse representation

use std::fmt;

use num_traits::Num;

use crate::error::Result;
use crate::matrix::ordering::compare;

/// A single nonzero entry in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseEntry<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> SparseEntry<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }

    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Sorts entries into row-major coordinate order
pub fn sort_entries<T>(entries: &mut [SparseEntry<T>]) {
    entries.sort_unstable_by(|a, b| compare(a.coord(), b.coord()));
}

/// Writes one `(row, col) = value` line per entry
pub(crate) fn write_entries<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    entries: &[SparseEntry<T>],
) -> fmt::Result {
    for entry in entries {
        writeln!(f, "({}, {}) = {}", entry.row, entry.col, entry.value)?;
    }
    Ok(())
}

/// Point access and ordered enumeration over a sparse matrix
///
/// Every coordinate here is logical: implementations apply their transpose
/// flag before touching storage. Implementations never store an exact zero.
pub trait SparseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an empty matrix with the given logical shape
    fn zeros(n_rows: usize, n_cols: usize) -> Self
    where
        Self: Sized;

    /// Logical `(rows, cols)`
    fn shape(&self) -> (usize, usize);

    /// Number of stored nonzeros
    fn nnz(&self) -> usize;

    fn is_transposed(&self) -> bool;

    /// Returns the stored value at `(i, j)` or zero
    fn get(&self, i: usize, j: usize) -> Result<T>;

    /// Stores `value` at `(i, j)`; a zero removes the coordinate
    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()>;

    /// All nonzeros in unspecified order
    fn entries(&self) -> Vec<SparseEntry<T>>;

    /// All nonzeros in row-major order
    fn sorted_entries(&self) -> Vec<SparseEntry<T>> {
        let mut entries = self.entries();
        sort_entries(&mut entries);
        entries
    }

    /// Adds `delta` to the value at `(i, j)`, dropping the entry if it cancels
    fn accumulate(&mut self, i: usize, j: usize, delta: T) -> Result<()> {
        let current = self.get(i, j)?;
        self.set(i, j, current + delta)
    }

    fn n_rows(&self) -> usize {
        self.shape().0
    }

    fn n_cols(&self) -> usize {
        self.shape().1
    }
}
