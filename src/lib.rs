//! # rbsparse: sparse matrices on a hash map or a red-black tree
//!
//! rbsparse stores only the nonzero entries of a matrix, behind one of two
//! interchangeable backends with the same algebraic surface:
//!
//! - [`HashSparseMatrix`]: a hash map keyed by coordinate. O(1) average point
//!   access; products use a row-bucket index of the right operand.
//! - [`TreeSparseMatrix`]: a left-leaning red-black tree keyed by row-major
//!   coordinate. O(log n) point access; inorder traversal is already sorted,
//!   so addition is a linear merge.
//!
//! Both support `get`, `set`, `transpose`, `add`, `scalar_multiply` and
//! `multiply`. Transposition flips a flag: stored coordinates are
//! reinterpreted on access, never moved.
//!
//! The [`SparseMatrix`] trait exposes the shared entry contract, and the
//! [`algebra`] module combines any pair of backends through it. A
//! [`DenseMatrix`] oracle backed by `ndarray` is provided for cross-checking.
//!
//! ## Usage
//!
//! ```
//! use rbsparse::{HashSparseMatrix, TreeSparseMatrix};
//!
//! let mut m = TreeSparseMatrix::new(3, 3);
//! m.set(0, 0, 1.0).unwrap();
//! m.set(1, 1, 2.0).unwrap();
//! m.set(2, 2, 3.0).unwrap();
//!
//! let squared = m.multiply(&m).unwrap();
//! assert_eq!(squared.get(2, 2).unwrap(), 9.0);
//! assert_eq!(squared.to_string(), "(0, 0) = 1\n(1, 1) = 4\n(2, 2) = 9\n");
//!
//! let h = HashSparseMatrix::identity(3).scalar_multiply(2.0);
//! assert_eq!(h.add(&h).unwrap().get(1, 1).unwrap(), 4.0);
//! ```
//!
//! Mixing backends goes through [`algebra`]:
//!
//! ```
//! use rbsparse::{algebra, HashSparseMatrix, MultiplyStrategy, TreeSparseMatrix};
//!
//! let a = HashSparseMatrix::identity(2);
//! let b = TreeSparseMatrix::from_triplets(2, 2, [(0, 1, 5.0)]).unwrap();
//! let c: TreeSparseMatrix<f64> = algebra::multiply(&a, &b, MultiplyStrategy::RowBucket).unwrap();
//! assert_eq!(c.get(0, 1).unwrap(), 5.0);
//! ```

pub mod error;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{MatrixError, Result};
pub use matrix::{algebra, conversion};
pub use matrix::{AlgebraConfig, MultiplyStrategy, Representation};
pub use matrix::{DenseMatrix, HashSparseMatrix, SparseEntry, SparseMatrix, TreeSparseMatrix};
pub use utils::{from_sprs, to_sprs_csr};

/// Version information for the rbsparse library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
