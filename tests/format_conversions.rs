//! Integration tests for format conversions with external libraries

use ndarray::arr2;
use sparse_matvecs::{build_csr, from_sprs_csr, matvecs_csr, to_sprs_csr, CsrMatrix, Error};

/// Creates a test matrix with a specific pattern
fn create_test_matrix_csr() -> CsrMatrix<i32> {
    // Create a 5x5 matrix with a specific pattern:
    // [ 1  0  2  0  0 ]
    // [ 0  3  0  0  4 ]
    // [ 0  0  5  0  0 ]
    // [ 6  0  0  7  0 ]
    // [ 0  0  8  0  9 ]
    let dense = arr2(&[
        [1, 0, 2, 0, 0],
        [0, 3, 0, 0, 4],
        [0, 0, 5, 0, 0],
        [6, 0, 0, 7, 0],
        [0, 0, 8, 0, 9],
    ]);
    build_csr(dense.view(), 9).unwrap()
}

#[test]
fn test_csr_to_sprs_conversion() {
    let ours = create_test_matrix_csr();

    // Convert to sprs format
    let sprs_mat = to_sprs_csr(&ours);

    // Verify dimensions and nnz
    assert_eq!(sprs_mat.rows(), 5);
    assert_eq!(sprs_mat.cols(), 5);
    assert_eq!(sprs_mat.nnz(), ours.nnz());

    // Verify it's in CSR format
    assert!(sprs_mat.is_csr());

    // Verify values by checking a few specific elements
    assert_eq!(sprs_mat.get(0, 0), Some(&1));
    assert_eq!(sprs_mat.get(0, 2), Some(&2));
    assert_eq!(sprs_mat.get(1, 4), Some(&4));
    assert_eq!(sprs_mat.get(3, 3), Some(&7));
    assert_eq!(sprs_mat.get(4, 4), Some(&9));

    // Check that zeros are really zeros
    assert_eq!(sprs_mat.get(0, 1), None);
    assert_eq!(sprs_mat.get(2, 3), None);
}

#[test]
fn test_sprs_to_csr_conversion() {
    // Create a sprs matrix directly
    let mut trip = sprs::TriMat::new((4, 4));
    trip.add_triplet(0, 0, 1i64);
    trip.add_triplet(0, 2, 2);
    trip.add_triplet(1, 1, 3);
    trip.add_triplet(2, 0, 4);
    trip.add_triplet(3, 3, 5);

    let sprs_mat = trip.to_csr();

    // Convert to our format
    let ours = from_sprs_csr(sprs_mat).unwrap();

    assert_eq!(ours.rows(), 4);
    assert_eq!(ours.nnz(), 5);
    assert_eq!(ours.row_ptr(), &[0, 2, 3, 4, 5]);
    assert_eq!(
        ours.to_dense(),
        arr2(&[[1, 0, 2, 0], [0, 3, 0, 0], [4, 0, 0, 0], [0, 0, 0, 5]])
    );

    // Usable directly by the engines
    assert_eq!(matvecs_csr(&ours, &[1, 1, 1, 1], 1).unwrap(), vec![3, 3, 4, 5]);
}

#[test]
fn test_csc_input_is_converted() {
    let ours = create_test_matrix_csr();
    let csc = to_sprs_csr(&ours).to_csc();
    assert!(csc.is_csc());

    let back = from_sprs_csr(csc).unwrap();
    assert_eq!(back, ours);
}

#[test]
fn test_rectangular_sprs_matrix_rejected() {
    let mut trip = sprs::TriMat::new((3, 2));
    trip.add_triplet(2, 1, 1i32);

    let err = from_sprs_csr(trip.to_csr()).unwrap_err();
    assert!(matches!(err, Error::NotSquare { rows: 3, cols: 2 }));
}
