//! Representation-independent sparse algebra
//!
//! Everything here works on the logical entry sequence exposed by
//! [`SparseMatrix`], so operands and results may use different backends
//! (a hash matrix times a tree matrix into a hash matrix, and so on).
//!
//! - Addition is a two-pointer merge over row-major sorted entries.
//! - Multiplication either pairs every nonzero of A with every nonzero of B
//!   ([`MultiplyStrategy::NestedLoop`]) or first buckets B by row
//!   ([`MultiplyStrategy::RowBucket`]).

use std::cmp::Ordering;
use std::collections::HashMap;

use num_traits::{Num, ToPrimitive};

use crate::error::{check_inner, check_same_shape, Result};
use crate::matrix::config::{AlgebraConfig, MultiplyStrategy};
use crate::matrix::ordering::compare;
use crate::matrix::traits::{SparseEntry, SparseMatrix};

/// Row index of B used by the bucketed product: row -> [(col, value)]
pub type RowBuckets<T> = HashMap<usize, Vec<(usize, T)>>;

/// Merges two row-major sorted entry sequences, summing shared coordinates
///
/// Coordinates present on one side only are copied verbatim; shared
/// coordinates whose sum is exactly zero are omitted. The output stays sorted.
pub fn merge_sorted<T>(a: &[SparseEntry<T>], b: &[SparseEntry<T>]) -> Vec<SparseEntry<T>>
where
    T: Copy + Num,
{
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match compare(a[i].coord(), b[j].coord()) {
            Ordering::Equal => {
                let sum = a[i].value + b[j].value;
                if !sum.is_zero() {
                    merged.push(SparseEntry::new(a[i].row, a[i].col, sum));
                }
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                merged.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                merged.push(b[j]);
                j += 1;
            }
        }
    }

    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// Builds the row-bucket index of a matrix's entries
pub fn row_buckets<T: Copy>(entries: &[SparseEntry<T>]) -> RowBuckets<T> {
    let mut buckets: RowBuckets<T> = HashMap::new();
    for entry in entries {
        buckets
            .entry(entry.row)
            .or_default()
            .push((entry.col, entry.value));
    }
    buckets
}

/// `C = A + B` for any pair of representations
pub fn add<T, A, B, C>(a: &A, b: &B) -> Result<C>
where
    T: Copy + Num,
    A: SparseMatrix<T>,
    B: SparseMatrix<T>,
    C: SparseMatrix<T>,
{
    check_same_shape("add", a.shape(), b.shape())?;

    let merged = merge_sorted(&a.sorted_entries(), &b.sorted_entries());
    let (n_rows, n_cols) = a.shape();
    collect_into(n_rows, n_cols, merged)
}

/// `C = alpha * A`
pub fn scalar_multiply<T, A, C>(a: &A, alpha: T) -> Result<C>
where
    T: Copy + Num,
    A: SparseMatrix<T>,
    C: SparseMatrix<T>,
{
    let (n_rows, n_cols) = a.shape();
    let mut result = C::zeros(n_rows, n_cols);
    if alpha.is_zero() {
        return Ok(result);
    }

    for entry in a.entries() {
        result.set(entry.row, entry.col, entry.value * alpha)?;
    }
    Ok(result)
}

/// Materializes `A^T` into a (non-flagged) matrix of type `C`
pub fn transpose<T, A, C>(a: &A) -> Result<C>
where
    T: Copy + Num,
    A: SparseMatrix<T>,
    C: SparseMatrix<T>,
{
    let (n_rows, n_cols) = a.shape();
    let mut result = C::zeros(n_cols, n_rows);
    for entry in a.entries() {
        result.set(entry.col, entry.row, entry.value)?;
    }
    Ok(result)
}

/// `C = A * B` using the given pairing strategy
pub fn multiply<T, A, B, C>(a: &A, b: &B, strategy: MultiplyStrategy) -> Result<C>
where
    T: Copy + Num,
    A: SparseMatrix<T>,
    B: SparseMatrix<T>,
    C: SparseMatrix<T>,
{
    check_inner(a.shape(), b.shape())?;

    let mut result = C::zeros(a.n_rows(), b.n_cols());
    let a_entries = a.sorted_entries();
    let b_entries = b.sorted_entries();

    match strategy {
        MultiplyStrategy::NestedLoop => {
            for ea in &a_entries {
                for eb in &b_entries {
                    if ea.col != eb.row {
                        continue;
                    }
                    let product = ea.value * eb.value;
                    if !product.is_zero() {
                        result.accumulate(ea.row, eb.col, product)?;
                    }
                }
            }
        }
        MultiplyStrategy::RowBucket => {
            let buckets = row_buckets(&b_entries);
            for ea in &a_entries {
                let Some(bucket) = buckets.get(&ea.col) else {
                    continue;
                };
                for &(col, b_val) in bucket {
                    let product = ea.value * b_val;
                    if !product.is_zero() {
                        result.accumulate(ea.row, col, product)?;
                    }
                }
            }
        }
    }

    Ok(result)
}

/// `C = A * B` honouring the strategy and drop tolerance in `config`
pub fn multiply_with_config<T, A, B, C>(a: &A, b: &B, config: &AlgebraConfig) -> Result<C>
where
    T: Copy + Num + ToPrimitive,
    A: SparseMatrix<T>,
    B: SparseMatrix<T>,
    C: SparseMatrix<T>,
{
    let product: C = multiply(a, b, config.strategy)?;
    let Some(tol) = config.drop_tolerance else {
        return Ok(product);
    };

    let kept = product
        .sorted_entries()
        .into_iter()
        .filter(|e| e.value.to_f64().map_or(true, |v| v.abs() > tol))
        .collect();
    collect_into(product.n_rows(), product.n_cols(), kept)
}

/// True if both matrices have the same shape and identical nonzeros
pub fn same_entries<T, A, B>(a: &A, b: &B) -> bool
where
    T: Copy + Num,
    A: SparseMatrix<T>,
    B: SparseMatrix<T>,
{
    a.shape() == b.shape() && a.sorted_entries() == b.sorted_entries()
}

/// True if both matrices agree entrywise within `tol`
///
/// Coordinates missing on one side compare against zero.
pub fn approx_eq<T, A, B>(a: &A, b: &B, tol: f64) -> bool
where
    T: Copy + Num + ToPrimitive,
    A: SparseMatrix<T>,
    B: SparseMatrix<T>,
{
    if a.shape() != b.shape() {
        return false;
    }

    let a_entries = a.sorted_entries();
    let b_entries = b.sorted_entries();
    let negated: Vec<_> = b_entries
        .iter()
        .map(|e| SparseEntry::new(e.row, e.col, T::zero() - e.value))
        .collect();

    merge_sorted(&a_entries, &negated)
        .iter()
        .all(|e| e.value.to_f64().map_or(false, |v| v.abs() <= tol))
}

fn collect_into<T, C>(n_rows: usize, n_cols: usize, entries: Vec<SparseEntry<T>>) -> Result<C>
where
    T: Copy + Num,
    C: SparseMatrix<T>,
{
    let mut result = C::zeros(n_rows, n_cols);
    for entry in entries {
        result.set(entry.row, entry.col, entry.value)?;
    }
    Ok(result)
}
