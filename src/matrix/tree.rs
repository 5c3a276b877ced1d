//! Red-black tree sparse matrix
//!
//! Nonzeros are nodes of a left-leaning red-black tree keyed by physical
//! `(row, col)` in row-major order, giving O(log n) point access and an
//! inorder traversal that is already sorted for the merge-based addition.
//!
//! Nodes live in an arena (`Vec<Node<T>>`) and reference their children by
//! index. Slots vacated by removals are recycled through a free list.
//! Dropping the matrix drops the arena, so teardown never recurses.
//!
//! Insertion follows the 2-3 tree encoding: a new leaf is red, and on the way
//! back up each node is repaired by (a) rotating a lone red right link to the
//! left, (b) rotating right on two reds in a row on the left, and (c) flipping
//! colours when both children are red. The root is then forced black.
//! Inserting an existing coordinate updates its value in place.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{AddAssign, MulAssign};

use num_traits::Num;

use crate::error::{check_bounds, check_inner, check_same_shape, MatrixError, Result};
use crate::matrix::algebra;
use crate::matrix::config::MultiplyStrategy;
use crate::matrix::ordering::{compare, oriented, Coord};
use crate::matrix::traits::{sort_entries, write_entries, SparseEntry, SparseMatrix};

type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

impl Color {
    fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    row: usize,
    col: usize,
    value: T,
    color: Color,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A sparse matrix backed by a left-leaning red-black tree
#[derive(Clone)]
pub struct TreeSparseMatrix<T> {
    /// Logical number of rows
    n_rows: usize,

    /// Logical number of columns
    n_cols: usize,

    /// When set, logical `(i, j)` is stored under key `(j, i)`
    transposed: bool,

    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl<T> TreeSparseMatrix<T>
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
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::new(n, n);
        for i in 0..n {
            matrix.insert_physical((i, i), T::one());
        }
        matrix
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
        self.nodes.len() - self.free.len()
    }

    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Maps a checked logical coordinate to its tree key
    fn physical(&self, i: usize, j: usize) -> Result<Coord> {
        check_bounds(i, j, self.shape())?;
        Ok(oriented((i, j), self.transposed))
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let key = self.physical(i, j)?;
        Ok(self
            .find_physical(key)
            .map_or_else(T::zero, |id| self.nodes[id].value))
    }

    pub fn contains(&self, i: usize, j: usize) -> Result<bool> {
        let key = self.physical(i, j)?;
        Ok(self.find_physical(key).is_some())
    }

    /// Stores `value` at `(i, j)` and returns the previous value
    ///
    /// An existing node is updated in place. A zero value removes the node.
    pub fn insert(&mut self, i: usize, j: usize, value: T) -> Result<Option<T>> {
        let key = self.physical(i, j)?;
        if value.is_zero() {
            return Ok(self.remove_physical(key));
        }
        let previous = self.find_physical(key).map(|id| self.nodes[id].value);
        self.insert_physical(key, value);
        Ok(previous)
    }

    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        self.insert(i, j, value).map(|_| ())
    }

    /// Removes `(i, j)` and returns its value, if any
    pub fn remove(&mut self, i: usize, j: usize) -> Result<Option<T>> {
        let key = self.physical(i, j)?;
        Ok(self.remove_physical(key))
    }

    /// Adds `delta` at `(i, j)` (find-or-insert), removing the node on cancellation
    pub fn accumulate(&mut self, i: usize, j: usize, delta: T) -> Result<()> {
        let key = self.physical(i, j)?;
        match self.find_physical(key) {
            Some(id) => {
                let sum = self.nodes[id].value + delta;
                if sum.is_zero() {
                    self.remove_physical(key);
                } else {
                    self.nodes[id].value = sum;
                }
            }
            None if !delta.is_zero() => self.insert_physical(key, delta),
            None => {}
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
    }

    /// Returns an independent copy viewed through the opposite transpose flag
    ///
    /// This clones the arena. [`Self::into_transpose`] and
    /// [`Self::transpose_in_place`] flip the flag in O(1).
    pub fn transpose(&self) -> Self {
        self.clone().into_transpose()
    }

    /// Flips the transpose flag without moving any node
    pub fn transpose_in_place(&mut self) {
        self.transposed = !self.transposed;
        std::mem::swap(&mut self.n_rows, &mut self.n_cols);
    }

    /// Consumes the matrix and returns its transpose in O(1)
    pub fn into_transpose(mut self) -> Self {
        self.transpose_in_place();
        self
    }

    /// Logical nonzeros in the tree's inorder (physical row-major) order
    pub fn entries(&self) -> Vec<SparseEntry<T>> {
        self.inorder()
            .into_iter()
            .map(|id| {
                let node = &self.nodes[id];
                let (i, j) = oriented((node.row, node.col), self.transposed);
                SparseEntry::new(i, j, node.value)
            })
            .collect()
    }

    /// Logical nonzeros in row-major order
    ///
    /// Inorder is already sorted unless the matrix is transposed, in which
    /// case physical order is logical column-major and has to be re-sorted.
    pub fn sorted_entries(&self) -> Vec<SparseEntry<T>> {
        let mut entries = self.entries();
        if self.transposed {
            sort_entries(&mut entries);
        }
        entries
    }

    /// `A + B` by merging both sorted entry sequences
    pub fn add(&self, other: &Self) -> Result<Self> {
        check_same_shape("add", self.shape(), other.shape())?;

        let merged = algebra::merge_sorted(&self.sorted_entries(), &other.sorted_entries());
        let mut result = Self::new(self.n_rows, self.n_cols);
        for entry in merged {
            result.insert_physical(entry.coord(), entry.value);
        }
        Ok(result)
    }

    /// `A += B`
    pub fn add_in_place(&mut self, other: &Self) -> Result<()> {
        let sum = self.add(other)?;
        *self = sum;
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

    /// Scales every node's value; keys and shape are untouched
    pub fn scalar_multiply_in_place(&mut self, alpha: T) {
        if alpha.is_zero() {
            self.clear();
            return;
        }

        let mut vanished = Vec::new();
        for id in self.inorder() {
            let node = &mut self.nodes[id];
            node.value = node.value * alpha;
            if node.value.is_zero() {
                vanished.push((node.row, node.col));
            }
        }
        for key in vanished {
            self.remove_physical(key);
        }
    }

    /// `A * B` by pairing every nonzero of A with every nonzero of B
    ///
    /// O(nnz(A) * nnz(B)) pairs are inspected; use [`Self::multiply_with`]
    /// and [`MultiplyStrategy::RowBucket`] for the bucketed product.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.multiply_with(other, MultiplyStrategy::NestedLoop)
    }

    pub fn multiply_with(&self, other: &Self, strategy: MultiplyStrategy) -> Result<Self> {
        check_inner(self.shape(), other.shape())?;
        if strategy == MultiplyStrategy::RowBucket {
            return algebra::multiply(self, other, strategy);
        }

        let a = self.sorted_entries();
        let b = other.sorted_entries();
        let mut result = Self::new(self.n_rows, other.n_cols);

        for ea in &a {
            for eb in &b {
                if ea.col == eb.row {
                    let product = ea.value * eb.value;
                    if !product.is_zero() {
                        result.accumulate(ea.row, eb.col, product)?;
                    }
                }
            }
        }

        Ok(result)
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        max_depth
    }

    /// Checks key order and the red-black invariants, returning the black height
    pub fn validate(&self) -> Result<usize> {
        let violation =
            |msg: String| -> Result<usize> { Err(MatrixError::InvariantViolation(msg)) };

        if self.is_red(self.root) {
            return violation("root is red".to_string());
        }

        let order = self.inorder();
        if order.len() != self.nnz() {
            return violation(format!(
                "{} reachable nodes but {} live slots",
                order.len(),
                self.nnz()
            ));
        }
        for pair in order.windows(2) {
            if compare(self.key(pair[0]), self.key(pair[1])) != Ordering::Less {
                return violation(format!(
                    "keys {:?} and {:?} out of order",
                    self.key(pair[0]),
                    self.key(pair[1])
                ));
            }
        }

        self.black_height(self.root)
    }

    fn black_height(&self, link: Option<NodeId>) -> Result<usize> {
        let Some(id) = link else {
            return Ok(1);
        };
        let node = &self.nodes[id];

        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(MatrixError::InvariantViolation(format!(
                "red node {:?} has a red child",
                self.key(id)
            )));
        }
        if self.is_red(node.right) {
            return Err(MatrixError::InvariantViolation(format!(
                "node {:?} leans right",
                self.key(id)
            )));
        }

        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return Err(MatrixError::InvariantViolation(format!(
                "black heights {} and {} differ below {:?}",
                left,
                right,
                self.key(id)
            )));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }

    // -- tree internals, all in physical coordinates --

    fn key(&self, id: NodeId) -> Coord {
        (self.nodes[id].row, self.nodes[id].col)
    }

    fn is_red(&self, link: Option<NodeId>) -> bool {
        link.map_or(false, |id| self.nodes[id].color == Color::Red)
    }

    fn left(&self, link: Option<NodeId>) -> Option<NodeId> {
        link.and_then(|id| self.nodes[id].left)
    }

    fn find_physical(&self, key: Coord) -> Option<NodeId> {
        let mut link = self.root;
        while let Some(id) = link {
            link = match compare(key, self.key(id)) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.nodes[id].left,
                Ordering::Greater => self.nodes[id].right,
            };
        }
        None
    }

    /// Node ids in key order
    fn inorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nnz());
        let mut stack = Vec::new();
        let mut link = self.root;
        loop {
            while let Some(id) = link {
                stack.push(id);
                link = self.nodes[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            order.push(id);
            link = self.nodes[id].right;
        }
        order
    }

    fn alloc(&mut self, key: Coord, value: T) -> NodeId {
        let node = Node {
            row: key.0,
            col: key.1,
            value,
            color: Color::Red,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id].left = None;
        self.nodes[id].right = None;
        self.free.push(id);
    }

    fn rotate_left(&mut self, h: NodeId) -> NodeId {
        let Some(x) = self.nodes[h].right else {
            return h;
        };
        self.nodes[h].right = self.nodes[x].left;
        self.nodes[x].left = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        x
    }

    fn rotate_right(&mut self, h: NodeId) -> NodeId {
        let Some(x) = self.nodes[h].left else {
            return h;
        };
        self.nodes[h].left = self.nodes[x].right;
        self.nodes[x].right = Some(h);
        self.nodes[x].color = self.nodes[h].color;
        self.nodes[h].color = Color::Red;
        x
    }

    fn flip_colors(&mut self, h: NodeId) {
        self.nodes[h].color = self.nodes[h].color.flipped();
        for child in [self.nodes[h].left, self.nodes[h].right].into_iter().flatten() {
            self.nodes[child].color = self.nodes[child].color.flipped();
        }
    }

    /// Restores the left-leaning invariants at `h` on the way up
    fn balance(&mut self, mut h: NodeId) -> NodeId {
        if self.is_red(self.nodes[h].right) && !self.is_red(self.nodes[h].left) {
            h = self.rotate_left(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.left(self.nodes[h].left)) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.nodes[h].left) && self.is_red(self.nodes[h].right) {
            self.flip_colors(h);
        }
        h
    }

    fn insert_physical(&mut self, key: Coord, value: T) {
        let root = self.insert_at(self.root, key, value);
        self.nodes[root].color = Color::Black;
        self.root = Some(root);
    }

    fn insert_at(&mut self, link: Option<NodeId>, key: Coord, value: T) -> NodeId {
        let Some(h) = link else {
            return self.alloc(key, value);
        };

        match compare(key, self.key(h)) {
            Ordering::Less => {
                let child = self.insert_at(self.nodes[h].left, key, value);
                self.nodes[h].left = Some(child);
            }
            Ordering::Greater => {
                let child = self.insert_at(self.nodes[h].right, key, value);
                self.nodes[h].right = Some(child);
            }
            Ordering::Equal => self.nodes[h].value = value,
        }

        self.balance(h)
    }

    fn remove_physical(&mut self, key: Coord) -> Option<T> {
        let value = self.nodes[self.find_physical(key)?].value;
        let root = self.root?;

        if !self.is_red(self.nodes[root].left) && !self.is_red(self.nodes[root].right) {
            self.nodes[root].color = Color::Red;
        }
        self.root = self.delete_at(root, key);
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
        Some(value)
    }

    /// Borrows a red link from the right sibling so the left child is not a 2-node
    fn move_red_left(&mut self, mut h: NodeId) -> NodeId {
        self.flip_colors(h);
        if self.is_red(self.left(self.nodes[h].right)) {
            if let Some(right) = self.nodes[h].right {
                self.nodes[h].right = Some(self.rotate_right(right));
            }
            h = self.rotate_left(h);
            self.flip_colors(h);
        }
        h
    }

    fn move_red_right(&mut self, mut h: NodeId) -> NodeId {
        self.flip_colors(h);
        if self.is_red(self.left(self.nodes[h].left)) {
            h = self.rotate_right(h);
            self.flip_colors(h);
        }
        h
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn delete_min(&mut self, mut h: NodeId) -> Option<NodeId> {
        if self.nodes[h].left.is_none() {
            self.release(h);
            return None;
        }
        if !self.is_red(self.nodes[h].left) && !self.is_red(self.left(self.nodes[h].left)) {
            h = self.move_red_left(h);
        }
        if let Some(left) = self.nodes[h].left {
            self.nodes[h].left = self.delete_min(left);
        }
        Some(self.balance(h))
    }

    /// Deletes `key` (known to be present) from the subtree rooted at `h`
    fn delete_at(&mut self, mut h: NodeId, key: Coord) -> Option<NodeId> {
        if compare(key, self.key(h)) == Ordering::Less {
            if !self.is_red(self.nodes[h].left) && !self.is_red(self.left(self.nodes[h].left)) {
                h = self.move_red_left(h);
            }
            if let Some(left) = self.nodes[h].left {
                self.nodes[h].left = self.delete_at(left, key);
            }
        } else {
            if self.is_red(self.nodes[h].left) {
                h = self.rotate_right(h);
            }
            if key == self.key(h) && self.nodes[h].right.is_none() {
                self.release(h);
                return None;
            }
            if !self.is_red(self.nodes[h].right) && !self.is_red(self.left(self.nodes[h].right)) {
                h = self.move_red_right(h);
            }
            if let Some(right) = self.nodes[h].right {
                if key == self.key(h) {
                    // Replace h with its successor, then drop the successor's node
                    let successor = self.min_node(right);
                    self.nodes[h].row = self.nodes[successor].row;
                    self.nodes[h].col = self.nodes[successor].col;
                    self.nodes[h].value = self.nodes[successor].value;
                    self.nodes[h].right = self.delete_min(right);
                } else {
                    self.nodes[h].right = self.delete_at(right, key);
                }
            }
        }
        Some(self.balance(h))
    }
}

impl<T> SparseMatrix<T> for TreeSparseMatrix<T>
where
    T: Copy + Num,
{
    fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_rows, n_cols)
    }

    fn shape(&self) -> (usize, usize) {
        TreeSparseMatrix::shape(self)
    }

    fn nnz(&self) -> usize {
        TreeSparseMatrix::nnz(self)
    }

    fn is_transposed(&self) -> bool {
        self.transposed
    }

    fn get(&self, i: usize, j: usize) -> Result<T> {
        TreeSparseMatrix::get(self, i, j)
    }

    fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        TreeSparseMatrix::set(self, i, j, value)
    }

    fn entries(&self) -> Vec<SparseEntry<T>> {
        TreeSparseMatrix::entries(self)
    }

    fn sorted_entries(&self) -> Vec<SparseEntry<T>> {
        TreeSparseMatrix::sorted_entries(self)
    }

    fn accumulate(&mut self, i: usize, j: usize, delta: T) -> Result<()> {
        TreeSparseMatrix::accumulate(self, i, j, delta)
    }
}

impl<T: Copy + Num> AddAssign<&TreeSparseMatrix<T>> for TreeSparseMatrix<T> {
    /// # Panics
    ///
    /// Panics if the shapes differ; use [`TreeSparseMatrix::add_in_place`] to
    /// handle the error.
    fn add_assign(&mut self, other: &TreeSparseMatrix<T>) {
        if let Err(err) = self.add_in_place(other) {
            panic!("{}", err);
        }
    }
}

impl<T: Copy + Num> MulAssign<T> for TreeSparseMatrix<T> {
    fn mul_assign(&mut self, alpha: T) {
        self.scalar_multiply_in_place(alpha);
    }
}

impl<T: Copy + Num + fmt::Display> fmt::Display for TreeSparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(f, &self.sorted_entries())
    }
}

impl<T> fmt::Debug for TreeSparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeSparseMatrix({}x{}, nnz={}, transposed={})",
            self.n_rows,
            self.n_cols,
            self.nodes.len() - self.free.len(),
            self.transposed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> TreeSparseMatrix<f64> {
        TreeSparseMatrix::from_triplets(3, 3, [(0, 0, 1.0), (1, 1, 2.0), (2, 2, 3.0)]).unwrap()
    }

    #[test]
    fn test_sequential_inserts_stay_balanced() {
        let n = 64;
        let mut m = TreeSparseMatrix::new(n, n);
        for i in 0..n {
            for j in 0..n {
                m.set(i, j, (i * n + j + 1) as f64).unwrap();
                m.validate().unwrap();
            }
        }

        assert_eq!(m.nnz(), n * n);
        // An LLRB with 4096 keys is at most 2 * log2(4097) + 1 deep
        assert!(m.height() <= 25, "height {}", m.height());
    }

    #[test]
    fn test_update_in_place() {
        let mut m = TreeSparseMatrix::new(4, 4);
        assert_eq!(m.insert(1, 2, 3.0).unwrap(), None);
        assert_eq!(m.insert(1, 2, 5.0).unwrap(), Some(3.0));
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.get(1, 2).unwrap(), 5.0);
        m.validate().unwrap();
    }

    #[test]
    fn test_set_zero_removes() {
        let mut m = TreeSparseMatrix::new(5, 5);
        for i in 0..5 {
            for j in 0..5 {
                m.set(i, j, 1.0 + i as f64).unwrap();
            }
        }

        for i in 0..5 {
            m.set(i, (i * 2) % 5, 0.0).unwrap();
            m.validate().unwrap();
        }

        assert_eq!(m.nnz(), 20);
        assert!(!m.contains(3, 1).unwrap());
        assert_eq!(m.get(3, 1).unwrap(), 0.0);
        assert!(m.sorted_entries().iter().all(|e| e.value != 0.0));
    }

    #[test]
    fn test_remove_everything_then_reuse_slots() {
        let mut m = TreeSparseMatrix::new(10, 10);
        for k in 0..10 {
            m.set(k, 9 - k, k as f64 + 1.0).unwrap();
        }
        for k in (0..10).rev() {
            assert_eq!(m.remove(k, 9 - k).unwrap(), Some(k as f64 + 1.0));
            m.validate().unwrap();
        }
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.remove(0, 9).unwrap(), None);

        m.set(4, 4, 2.0).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(m.nodes.len(), 10);
    }

    #[test]
    fn test_inorder_is_row_major() {
        let m = TreeSparseMatrix::from_triplets(
            3,
            3,
            [(2, 1, 1.0), (0, 2, 2.0), (1, 0, 3.0), (0, 0, 4.0)],
        )
        .unwrap();
        let coords: Vec<_> = m.entries().iter().map(|e| e.coord()).collect();
        assert_eq!(coords, vec![(0, 0), (0, 2), (1, 0), (2, 1)]);
    }

    #[test]
    fn test_transpose_reads_through_flag() {
        let m = TreeSparseMatrix::from_triplets(2, 3, [(0, 2, 5.0), (1, 0, 6.0)]).unwrap();
        let t = m.transpose();

        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 0).unwrap(), 5.0);
        assert_eq!(t.get(0, 1).unwrap(), 6.0);
        let coords: Vec<_> = t.sorted_entries().iter().map(|e| e.coord()).collect();
        assert_eq!(coords, vec![(0, 1), (2, 0)]);

        assert_eq!(t.transpose().sorted_entries(), m.sorted_entries());
    }

    #[test]
    fn test_diagonal_scenario() {
        let m = diagonal();

        let sum = m.add(&m).unwrap();
        assert_eq!(sum.to_string(), "(0, 0) = 2\n(1, 1) = 4\n(2, 2) = 6\n");

        assert_eq!(m.scalar_multiply(0.0).nnz(), 0);

        let product = m.multiply(&m).unwrap();
        assert_eq!(product.to_string(), "(0, 0) = 1\n(1, 1) = 4\n(2, 2) = 9\n");
    }

    #[test]
    fn test_add_transposed_operand() {
        let a = TreeSparseMatrix::from_triplets(2, 2, [(0, 1, 1.0), (1, 0, 1.0)]).unwrap();
        let b = TreeSparseMatrix::from_triplets(2, 2, [(0, 1, -1.0), (1, 1, 2.0)])
            .unwrap()
            .transpose();

        // b^T = [0 0; -1 2]
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.nnz(), 2);
        assert_eq!(sum.get(0, 1).unwrap(), 1.0);
        assert_eq!(sum.get(1, 1).unwrap(), 2.0);
        assert_eq!(sum.get(1, 0).unwrap(), 0.0);
        sum.validate().unwrap();
    }

    #[test]
    fn test_multiply_strategies_agree() {
        let a = TreeSparseMatrix::from_triplets(
            3,
            4,
            [(0, 0, 1.0), (0, 3, 2.0), (1, 1, -1.0), (2, 0, 4.0), (2, 2, 3.0)],
        )
        .unwrap();
        let b = TreeSparseMatrix::from_triplets(
            4,
            2,
            [(0, 0, 1.0), (0, 1, 5.0), (1, 1, 2.0), (2, 0, -2.0), (3, 1, 1.0)],
        )
        .unwrap();

        let nested = a.multiply(&b).unwrap();
        let bucketed = a.multiply_with(&b, MultiplyStrategy::RowBucket).unwrap();

        assert_eq!(nested.sorted_entries(), bucketed.sorted_entries());
        assert_eq!(nested.get(0, 1).unwrap(), 7.0);
        assert_eq!(nested.get(1, 1).unwrap(), -2.0);
        assert_eq!(nested.get(2, 0).unwrap(), -2.0);
        assert_eq!(nested.get(2, 1).unwrap(), 20.0);
    }

    #[test]
    fn test_multiply_transposed_right_operand() {
        let a = TreeSparseMatrix::from_triplets(2, 3, [(0, 0, 1.0), (0, 1, 2.0), (1, 2, 3.0)])
            .unwrap();
        let product = a.multiply(&a.transpose()).unwrap();

        assert_eq!(product.shape(), (2, 2));
        assert_eq!(product.get(0, 0).unwrap(), 5.0);
        assert_eq!(product.get(1, 1).unwrap(), 9.0);
        assert_eq!(product.nnz(), 2);
    }

    #[test]
    fn test_scalar_multiply_in_place() {
        let mut m = diagonal();
        m *= 3.0;
        assert_eq!(m.get(2, 2).unwrap(), 9.0);
        m.validate().unwrap();

        m *= 0.0;
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.validate().unwrap(), 1);
    }

    #[test]
    fn test_empty_operations() {
        let empty = TreeSparseMatrix::<f64>::new(4, 4);
        assert_eq!(empty.add(&empty).unwrap().nnz(), 0);
        assert_eq!(empty.multiply(&empty).unwrap().nnz(), 0);
        assert_eq!(empty.transpose().nnz(), 0);
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_out_of_range() {
        let mut m = TreeSparseMatrix::<f64>::new(2, 2);
        assert!(matches!(m.set(2, 0, 1.0), Err(MatrixError::OutOfRange { .. })));
        let t = m.into_transpose();
        assert!(t.get(1, 1).is_ok());
    }

    #[test]
    fn test_debug_summary() {
        assert_eq!(
            format!("{:?}", diagonal().transpose()),
            "TreeSparseMatrix(3x3, nnz=3, transposed=true)"
        );
    }
}
