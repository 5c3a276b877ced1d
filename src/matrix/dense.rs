//! Dense reference matrix
//!
//! A plain `ndarray::Array2` with the same algebraic surface as the sparse
//! backends. It is not optimized; it exists to cross-check sparse results.

use ndarray::Array2;
use num_traits::Num;

use crate::error::{check_bounds, check_inner, check_same_shape, Result};

/// A dense matrix used as a correctness oracle
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    data: Array2<T>,
}

impl<T> DenseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an all-zero `n_rows x n_cols` matrix
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: Array2::from_elem((n_rows, n_cols), T::zero()),
        }
    }

    /// Wraps an existing array
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        check_bounds(i, j, self.shape())?;
        Ok(self.data[[i, j]])
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        check_bounds(i, j, self.shape())?;
        self.data[[i, j]] = value;
        Ok(())
    }

    /// Number of entries that are not exactly zero
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        check_same_shape("add", self.shape(), other.shape())?;
        let (n_rows, n_cols) = self.shape();
        Ok(Self {
            data: Array2::from_shape_fn((n_rows, n_cols), |(i, j)| {
                self.data[[i, j]] + other.data[[i, j]]
            }),
        })
    }

    pub fn scalar_multiply(&self, alpha: T) -> Self {
        Self {
            data: self.data.mapv(|v| v * alpha),
        }
    }

    /// Schoolbook triple loop
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        check_inner(self.shape(), other.shape())?;

        let (n_rows, inner) = self.shape();
        let n_cols = other.shape().1;
        let mut result = Self::zeros(n_rows, n_cols);

        for i in 0..n_rows {
            for j in 0..n_cols {
                let mut sum = T::zero();
                for k in 0..inner {
                    sum = sum + self.data[[i, k]] * other.data[[k, j]];
                }
                result.data[[i, j]] = sum;
            }
        }

        Ok(result)
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.t().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_multiplication() {
        // A = [1 2; 0 3], B = [4 5; 6 7] => C = [16 19; 18 21]
        let a = DenseMatrix::from_array(array![[1, 2], [0, 3]]);
        let b = DenseMatrix::from_array(array![[4, 5], [6, 7]]);

        let c = a.multiply(&b).unwrap();

        assert_eq!(c.as_array(), &array![[16, 19], [18, 21]]);
    }

    #[test]
    fn test_rectangular_transpose_and_add() {
        let a = DenseMatrix::from_array(array![[1.0, 0.0, 2.0], [0.0, 3.0, 0.0]]);
        let t = a.transpose();

        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 0).unwrap(), 2.0);

        let doubled = a.add(&a).unwrap();
        assert_eq!(doubled, a.scalar_multiply(2.0));
        assert_eq!(doubled.count_nonzero(), 3);

        assert!(a.add(&t).is_err());
        assert!(a.multiply(&a).is_err());
    }
}
