use rbsparse::{algebra, HashSparseMatrix, MultiplyStrategy, TreeSparseMatrix};

fn main() -> rbsparse::Result<()> {
    println!("rbsparse {}: hash and red-black tree sparse matrices", rbsparse::VERSION);

    // A = [1 2 0]      B = [7 0 8]
    //     [0 3 0]          [9 0 0]
    //     [4 0 5]          [0 10 0]
    let a = TreeSparseMatrix::from_triplets(
        3,
        3,
        [(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0), (2, 0, 4.0), (2, 2, 5.0)],
    )?;
    let b = HashSparseMatrix::from_triplets(
        3,
        3,
        [(0, 0, 7.0), (0, 2, 8.0), (1, 0, 9.0), (2, 1, 10.0)],
    )?;

    println!("\nMatrix A: {:?}", a);
    print!("{}", a);
    println!("\nMatrix B: {:?}", b);
    print!("{}", b);

    println!("\nA + A (tree merge):");
    print!("{}", a.add(&a)?);

    println!("\nA^T (flag only):");
    print!("{}", a.transpose());

    println!("\nB * B (row buckets):");
    print!("{}", b.multiply(&b)?);

    println!("\nA * B (tree x hash into hash):");
    let product: HashSparseMatrix<f64> = algebra::multiply(&a, &b, MultiplyStrategy::RowBucket)?;
    print!("{}", product);

    Ok(())
}
