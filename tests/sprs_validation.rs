//! Validate sparse products against sprs (standard Rust library)

use rbsparse::{from_sprs, to_sprs_csr, HashSparseMatrix, SparseMatrix, TreeSparseMatrix};

/// Create a simple test matrix
fn create_test_matrix<M: SparseMatrix<f64>>() -> M {
    // Create a 4x4 matrix:
    // [1 2 0 0]
    // [0 3 4 0]
    // [0 0 5 6]
    // [7 0 0 8]
    let mut m = M::zeros(4, 4);
    for (i, j, v) in [
        (0, 0, 1.0),
        (0, 1, 2.0),
        (1, 1, 3.0),
        (1, 2, 4.0),
        (2, 2, 5.0),
        (2, 3, 6.0),
        (3, 0, 7.0),
        (3, 3, 8.0),
    ] {
        m.set(i, j, v).unwrap();
    }
    m
}

fn assert_same_as_sprs<M: SparseMatrix<f64>>(ours: &M, theirs: &sprs::CsMat<f64>) {
    assert_eq!(ours.shape(), theirs.shape());
    assert_eq!(ours.nnz(), theirs.nnz());

    for (&value, (row, col)) in theirs.iter() {
        assert!(
            (ours.get(row, col).unwrap() - value).abs() < 1e-10,
            "Value mismatch at ({}, {}): {} vs {}",
            row,
            col,
            ours.get(row, col).unwrap(),
            value
        );
    }
}

#[test]
fn test_hash_multiply_vs_sprs() {
    let a: HashSparseMatrix<f64> = create_test_matrix();
    let result = a.multiply(&a).unwrap();

    let a_sprs = to_sprs_csr(&a);
    let result_sprs = &a_sprs * &a_sprs;

    assert_same_as_sprs(&result, &result_sprs);
}

#[test]
fn test_tree_multiply_vs_sprs() {
    let a: TreeSparseMatrix<f64> = create_test_matrix();
    let at = a.transpose();
    let result = a.multiply(&at).unwrap();

    let result_sprs = &to_sprs_csr(&a) * &to_sprs_csr(&at);

    assert_same_as_sprs(&result, &result_sprs);
}

#[test]
fn test_sum_vs_sprs() {
    let a: TreeSparseMatrix<f64> = create_test_matrix();
    let b: HashSparseMatrix<f64> = create_test_matrix();
    let result = a.add(&a.transpose()).unwrap();

    let result_sprs = &to_sprs_csr(&b) + &to_sprs_csr(&b.transpose());

    assert_same_as_sprs(&result, &result_sprs);
}

#[test]
fn test_import_sprs_product() {
    let a: HashSparseMatrix<f64> = create_test_matrix();
    let a_sprs = to_sprs_csr(&a);
    let product = &a_sprs * &a_sprs;

    let imported: TreeSparseMatrix<f64> = from_sprs(&product).unwrap();
    imported.validate().unwrap();

    assert_eq!(
        imported.sorted_entries(),
        a.multiply(&a).unwrap().sorted_entries()
    );
}
