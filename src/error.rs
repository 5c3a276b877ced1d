//! Error type shared by both sparse representations and the dense oracle

use thiserror::Error;

/// Unified error type for rbsparse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("index ({row}, {col}) out of range for {n_rows}x{n_cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        n_rows: usize,
        n_cols: usize,
    },
    #[error("red-black invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Fails with `OutOfRange` unless `(row, col)` lies inside `shape`.
pub(crate) fn check_bounds(row: usize, col: usize, shape: (usize, usize)) -> Result<()> {
    if row < shape.0 && col < shape.1 {
        Ok(())
    } else {
        Err(MatrixError::OutOfRange {
            row,
            col,
            n_rows: shape.0,
            n_cols: shape.1,
        })
    }
}

/// Fails with `DimensionMismatch` unless both shapes are equal.
pub(crate) fn check_same_shape(
    op: &'static str,
    left: (usize, usize),
    right: (usize, usize),
) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(MatrixError::DimensionMismatch { op, left, right })
    }
}

/// Fails with `DimensionMismatch` unless `left.cols == right.rows`.
pub(crate) fn check_inner(left: (usize, usize), right: (usize, usize)) -> Result<()> {
    if left.1 == right.0 {
        Ok(())
    } else {
        Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left,
            right,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = check_inner((2, 3), (4, 5)).unwrap_err();
        assert_eq!(err.to_string(), "dimension mismatch in multiply: 2x3 vs 4x5");

        let err = check_bounds(3, 0, (3, 3)).unwrap_err();
        assert_eq!(err.to_string(), "index (3, 0) out of range for 3x3 matrix");
    }

    #[test]
    fn test_same_shape() {
        assert!(check_same_shape("add", (2, 2), (2, 2)).is_ok());
        assert!(matches!(
            check_same_shape("add", (2, 2), (2, 3)),
            Err(MatrixError::DimensionMismatch { op: "add", .. })
        ));
    }
}
