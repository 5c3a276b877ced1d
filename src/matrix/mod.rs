// Matrix data structures and operations

pub mod algebra;
pub mod config;
pub mod conversion;
pub mod dense;
pub mod hash;
pub mod ordering;
pub mod traits;
pub mod tree;

pub use config::{AlgebraConfig, MultiplyStrategy, Representation};
pub use dense::DenseMatrix;
pub use hash::HashSparseMatrix;
pub use ordering::{compare, is_less_than, Coord};
pub use traits::{SparseEntry, SparseMatrix};
pub use tree::TreeSparseMatrix;
