//! Configuration for the sparse algebra

/// The storage backing a sparse matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Hash map keyed by coordinate
    Hash,
    /// Left-leaning red-black tree keyed by row-major coordinate
    Tree,
}

impl Representation {
    /// The multiplication strategy each backend uses unless told otherwise
    pub fn default_strategy(&self) -> MultiplyStrategy {
        match self {
            Representation::Hash => MultiplyStrategy::RowBucket,
            Representation::Tree => MultiplyStrategy::NestedLoop,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Representation::Hash => "hash",
            Representation::Tree => "tree",
        }
    }
}

/// How a sparse product pairs up operand entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplyStrategy {
    /// Every nonzero of A against every nonzero of B: O(nnz(A) * nnz(B))
    NestedLoop,
    /// Index B by row once, then visit only the matching bucket:
    /// O(nnz(A) + nnz(B) + work)
    RowBucket,
}

impl Default for MultiplyStrategy {
    fn default() -> Self {
        MultiplyStrategy::RowBucket
    }
}

/// Configuration for a sparse product
#[derive(Debug, Clone)]
pub struct AlgebraConfig {
    /// Pairing strategy for multiplication
    pub strategy: MultiplyStrategy,

    /// Entries of the product with `|v| <= tol` are discarded
    /// If None, only exact zeros are dropped
    pub drop_tolerance: Option<f64>,
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self {
            strategy: MultiplyStrategy::default(),
            drop_tolerance: None,
        }
    }
}

impl AlgebraConfig {
    /// Create a config matching a backend's native behaviour
    pub fn for_representation(repr: Representation) -> Self {
        Self {
            strategy: repr.default_strategy(),
            drop_tolerance: None,
        }
    }

    pub fn with_strategy(mut self, strategy: MultiplyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_drop_tolerance(mut self, tol: f64) -> Self {
        self.drop_tolerance = Some(tol);
        self
    }
}
