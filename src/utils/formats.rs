//! Utilities for converting between our matrix backends and sprs

use num_traits::Num;
use sprs::CsMat;

use crate::error::Result;
use crate::matrix::SparseMatrix;
use crate::utils::exclusive_scan;

/// Converts any sparse backend to a sprs CSR matrix
///
/// The logical matrix is exported, so a transposed backend yields the
/// transposed CSR layout.
pub fn to_sprs_csr<T, M>(matrix: &M) -> CsMat<T>
where
    T: Copy + Num + Default,
    M: SparseMatrix<T>,
{
    let (n_rows, n_cols) = matrix.shape();
    let entries = matrix.sorted_entries();

    let mut row_counts = vec![0; n_rows];
    for entry in &entries {
        row_counts[entry.row] += 1;
    }

    let row_ptr = exclusive_scan(&row_counts);
    let col_idx = entries.iter().map(|e| e.col).collect();
    let values = entries.iter().map(|e| e.value).collect();

    CsMat::new((n_rows, n_cols), row_ptr, col_idx, values)
}

/// Collects a sprs matrix (CSR or CSC) into any sparse backend
///
/// Explicitly stored zeros are skipped.
pub fn from_sprs<T, M>(matrix: &CsMat<T>) -> Result<M>
where
    T: Copy + Num + Default,
    M: SparseMatrix<T>,
{
    let (n_rows, n_cols) = matrix.shape();
    let mut result = M::zeros(n_rows, n_cols);

    for (&value, (row, col)) in matrix.iter() {
        if !value.is_zero() {
            result.set(row, col, value)?;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{HashSparseMatrix, TreeSparseMatrix};

    fn sample() -> TreeSparseMatrix<f64> {
        // [1 0 2]
        // [0 0 0]
        // [4 0 5]
        TreeSparseMatrix::from_triplets(
            3,
            3,
            [(0, 0, 1.0), (0, 2, 2.0), (2, 0, 4.0), (2, 2, 5.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_to_sprs_layout() {
        let csr = to_sprs_csr(&sample());

        assert!(csr.is_csr());
        assert_eq!(csr.shape(), (3, 3));
        assert_eq!(csr.nnz(), 4);
        assert_eq!(csr.indptr().as_slice().unwrap(), &[0, 2, 2, 4]);
        assert_eq!(csr.indices(), &[0, 2, 0, 2]);
        assert_eq!(csr.get(2, 0), Some(&4.0));
        assert_eq!(csr.get(1, 1), None);
    }

    #[test]
    fn test_sprs_roundtrip_through_hash() {
        let original = sample();
        let csr = to_sprs_csr(&original);
        let hash: HashSparseMatrix<f64> = from_sprs(&csr).unwrap();

        assert_eq!(hash.sorted_entries(), original.sorted_entries());
    }

    #[test]
    fn test_transposed_export() {
        let t = sample().transpose();
        let csr = to_sprs_csr(&t);

        assert_eq!(csr.get(0, 2), Some(&4.0));
        assert_eq!(csr.get(2, 0), Some(&2.0));

        let csc: TreeSparseMatrix<f64> = from_sprs(&csr.to_csc()).unwrap();
        assert_eq!(csc.sorted_entries(), t.sorted_entries());
    }
}
