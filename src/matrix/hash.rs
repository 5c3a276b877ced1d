//! Hash-indexed sparse matrix
//!
//! Nonzeros live in a `HashMap` keyed by physical `(row, col)`. Transposition
//! only flips a flag; [`HashSparseMatrix::physical`] is the single place where
//! logical coordinates are mapped onto storage keys.

use std::collections::HashMap;
use std::fmt;
use std::ops::{AddAssign, MulAssign};

use num_traits::Num;

use crate::error::{check_bounds, check_inner, check_same_shape, Result};
use crate::matrix::algebra;
use crate::matrix::config::MultiplyStrategy;
use crate::matrix::ordering::{oriented, Coord};
use crate::matrix::traits::{sort_entries, write_entries, SparseEntry, SparseMatrix};

/// A sparse matrix backed by a hash map
///
/// `get`/`set` are O(1) on average. The map is deep-copied on `clone`.
#[derive(Clone)]
pub struct HashSparseMatrix<T> {
    /// Logical number of rows
    n_rows: usize,

    /// Logical number of columns
    n_cols: usize,

    /// When set, logical `(i, j)` is stored under key `(j, i)`
    transposed: bool,

    data: HashMap<Coord, T>,
}

impl<T> HashSparseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an empty `n_rows x n_cols` matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::with_transposed(n_rows, n_cols, false)
    }

    /// Creates an empty matrix whose storage is read through the transpose flag
    pub fn with_transposed(n_rows: usize, n_cols: usize, transposed: bool) -> Self {
        Self {
            n_rows,
            n_cols,
            transposed,
            data: HashMap::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let mut data = HashMap::with_capacity(n);
        for i in 0..n {
            data.insert((i, i), T::one());
        }
        Self {
            n_rows: n,
            n_cols: n,
            transposed: false,
            data,
        }
    }

    /// Builds a matrix from `(row, col, value)` triples; later triples overwrite
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self> {
        let mut matrix = Self::new(n_rows, n_cols);
        for (i, j, value) in triplets {
            matrix.set(i, j, value)?;
        }
        Ok(matrix)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Maps a checked logical coordinate to its storage key
    fn physical(&self, i: usize, j: usize) -> Result<Coord> {
        check_bounds(i, j, self.shape())?;
        Ok(oriented((i, j), self.transposed))
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let key = self.physical(i, j)?;
        Ok(self.data.get(&key).copied().unwrap_or_else(T::zero))
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let key = self.physical(i, j)?;
        if value.is_zero() {
            self.data.remove(&key);
        } else {
            self.data.insert(key, value);
        }
        Ok(())
    }

    /// Adds `delta` at `(i, j)`, removing the entry if the sum is zero
    pub fn accumulate(&mut self, i: usize, j: usize, delta: T) -> Result<()> {
        let key = self.physical(i, j)?;
        let sum = match self.data.get(&key) {
            Some(&current) => current + delta,
            None => delta,
        };
        if sum.is_zero() {
            self.data.remove(&key);
        } else {
            self.data.insert(key, sum);
        }
        Ok(())
    }

    /// Returns an independent copy viewed through the opposite transpose flag
    ///
    /// This clones every entry. Use [`Self::into_transpose`] or
    /// [`Self::transpose_in_place`] for the O(1) flag flip when no separate
    /// copy is needed.
    pub fn transpose(&self) -> Self {
        self.clone().into_transpose()
    }

    /// Flips the transpose flag without moving any entry
    pub fn transpose_in_place(&mut self) {
        self.transposed = !self.transposed;
        std::mem::swap(&mut self.n_rows, &mut self.n_cols);
    }

    /// Consumes the matrix and returns its transpose in O(1)
    pub fn into_transpose(mut self) -> Self {
        self.transpose_in_place();
        self
    }

    /// Logical nonzeros in unspecified order
    pub fn entries(&self) -> Vec<SparseEntry<T>> {
        self.data
            .iter()
            .map(|(&key, &value)| {
                let (i, j) = oriented(key, self.transposed);
                SparseEntry::new(i, j, value)
            })
            .collect()
    }

    /// Logical nonzeros in row-major order
    pub fn sorted_entries(&self) -> Vec<SparseEntry<T>> {
        let mut entries = self.entries();
        sort_entries(&mut entries);
        entries
    }

    /// `A + B`; fails unless both shapes match
    pub fn add(&self, other: &Self) -> Result<Self> {
        let mut result = self.clone();
        result.add_in_place(other)?;
        Ok(result)
    }

    /// `A += B`; fails unless both shapes match
    pub fn add_in_place(&mut self, other: &Self) -> Result<()> {
        check_same_shape("add", self.shape(), other.shape())?;
        for entry in other.entries() {
            self.accumulate(entry.row, entry.col, entry.value)?;
        }
        Ok(())
    }

    /// `alpha * A`; a zero `alpha` yields an empty matrix
    pub fn scalar_multiply(&self, alpha: T) -> Self {
        if alpha.is_zero() {
            return Self::with_transposed(self.n_rows, self.n_cols, self.transposed);
        }
        let mut result = self.clone();
        result.scalar_multiply_in_place(alpha);
        result
    }

    pub fn scalar_multiply_in_place(&mut self, alpha: T) {
        if alpha.is_zero() {
            self.data.clear();
            return;
        }
        for value in self.data.values_mut() {
            *value = *value * alpha;
        }
        // Scaling can underflow to zero
        self.data.retain(|_, value| !value.is_zero());
    }

    /// `A * B` through a row-bucket index of B
    ///
    /// Runs in O(nnz(A) + nnz(B) + work) after sorting both operands, where
    /// work is the number of nonzero products. Products reach each output
    /// cell in ascending inner index, so equal inputs give bit-identical sums.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        check_inner(self.shape(), other.shape())?;

        let buckets = algebra::row_buckets(&other.sorted_entries());
        let mut result = Self::new(self.n_rows, other.n_cols);

        for entry in self.sorted_entries() {
            let Some(bucket) = buckets.get(&entry.col) else {
                continue;
            };
            for &(j, b_val) in bucket {
                result.accumulate(entry.row, j, entry.value * b_val)?;
            }
        }

        Ok(result)
    }

    /// `A * B` with an explicit pairing strategy
    pub fn multiply_with(&self, other: &Self, strategy: MultiplyStrategy) -> Result<Self> {
        match strategy {
            MultiplyStrategy::RowBucket => self.multiply(other),
            MultiplyStrategy::NestedLoop => algebra::multiply(self, other, strategy),
        }
    }
}

impl<T> SparseMatrix<T> for HashSparseMatrix<T>
where
    T: Copy + Num,
{
    fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_rows, n_cols)
    }

    fn shape(&self) -> (usize, usize) {
        HashSparseMatrix::shape(self)
    }

    fn nnz(&self) -> usize {
        HashSparseMatrix::nnz(self)
    }

    fn is_transposed(&self) -> bool {
        self.transposed
    }

    fn get(&self, i: usize, j: usize) -> Result<T> {
        HashSparseMatrix::get(self, i, j)
    }

    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        HashSparseMatrix::set(self, i, j, value)
    }

    fn entries(&self) -> Vec<SparseEntry<T>> {
        HashSparseMatrix::entries(self)
    }

    fn accumulate(&mut self, i: usize, j: usize, delta: T) -> Result<()> {
        HashSparseMatrix::accumulate(self, i, j, delta)
    }
}

impl<T: Copy + Num> AddAssign<&HashSparseMatrix<T>> for HashSparseMatrix<T> {
    /// # Panics
    ///
    /// Panics if the shapes differ; use [`HashSparseMatrix::add_in_place`] to
    /// handle the error.
    fn add_assign(&mut self, other: &HashSparseMatrix<T>) {
        if let Err(err) = self.add_in_place(other) {
            panic!("{}", err);
        }
    }
}

impl<T: Copy + Num> MulAssign<T> for HashSparseMatrix<T> {
    fn mul_assign(&mut self, alpha: T) {
        self.scalar_multiply_in_place(alpha);
    }
}

impl<T: Copy + Num + fmt::Display> fmt::Display for HashSparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(f, &self.sorted_entries())
    }
}

impl<T> fmt::Debug for HashSparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HashSparseMatrix({}x{}, nnz={}, transposed={})",
            self.n_rows,
            self.n_cols,
            self.data.len(),
            self.transposed
        )
    }
}
