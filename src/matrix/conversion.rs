//! Conversions between the sparse backends and the dense oracle

use ndarray::Array2;
use num_traits::Num;

use crate::error::Result;
use crate::matrix::dense::DenseMatrix;
use crate::matrix::traits::SparseMatrix;
use crate::matrix::{HashSparseMatrix, TreeSparseMatrix};

/// Expands any sparse matrix into a dense one
pub fn to_dense<T, M>(matrix: &M) -> DenseMatrix<T>
where
    T: Copy + Num,
    M: SparseMatrix<T>,
{
    let mut data = Array2::from_elem(matrix.shape(), T::zero());
    for entry in matrix.entries() {
        data[[entry.row, entry.col]] = entry.value;
    }
    DenseMatrix::from_array(data)
}

/// Collects the nonzeros of a dense matrix into any sparse backend
pub fn from_dense<T, M>(dense: &DenseMatrix<T>) -> Result<M>
where
    T: Copy + Num,
    M: SparseMatrix<T>,
{
    let (n_rows, n_cols) = dense.shape();
    let mut matrix = M::zeros(n_rows, n_cols);
    for ((i, j), &value) in dense.as_array().indexed_iter() {
        if !value.is_zero() {
            matrix.set(i, j, value)?;
        }
    }
    Ok(matrix)
}

/// Copies the logical entries of `source` into a fresh matrix of type `M`
pub fn convert<T, S, M>(source: &S) -> Result<M>
where
    T: Copy + Num,
    S: SparseMatrix<T>,
    M: SparseMatrix<T>,
{
    let (n_rows, n_cols) = source.shape();
    let mut matrix = M::zeros(n_rows, n_cols);
    for entry in source.sorted_entries() {
        matrix.set(entry.row, entry.col, entry.value)?;
    }
    Ok(matrix)
}

impl<T: Copy + Num> HashSparseMatrix<T> {
    pub fn to_dense(&self) -> DenseMatrix<T> {
        to_dense(self)
    }

    /// Rebuilds the same logical matrix on the tree backend
    pub fn to_tree(&self) -> Result<TreeSparseMatrix<T>> {
        convert(self)
    }
}

impl<T: Copy + Num> TreeSparseMatrix<T> {
    pub fn to_dense(&self) -> DenseMatrix<T> {
        to_dense(self)
    }

    /// Rebuilds the same logical matrix on the hash backend
    pub fn to_hash(&self) -> Result<HashSparseMatrix<T>> {
        convert(self)
    }
}
