//! Row-major coordinate ordering
//!
//! `(i1, j1) < (i2, j2)` iff `i1 < i2`, or `i1 == i2` and `j1 < j2`. This is the
//! key order of the tree backend and the merge order of sparse addition.

use std::cmp::Ordering;

/// A `(row, col)` pair
pub type Coord = (usize, usize);

/// Returns true if `(i1, j1)` precedes `(i2, j2)` in row-major order
#[inline]
pub fn is_less_than(i1: usize, j1: usize, i2: usize, j2: usize) -> bool {
    i1 < i2 || (i1 == i2 && j1 < j2)
}

/// Total row-major comparison of two coordinates
#[inline]
pub fn compare(a: Coord, b: Coord) -> Ordering {
    if is_less_than(a.0, a.1, b.0, b.1) {
        Ordering::Less
    } else if a == b {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

/// Swaps the coordinate when `transposed` is set
///
/// Maps a logical coordinate to the physical one (and back, since it is an
/// involution).
#[inline]
pub fn oriented(coord: Coord, transposed: bool) -> Coord {
    if transposed {
        (coord.1, coord.0)
    } else {
        coord
    }
}
