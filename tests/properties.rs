//! Property tests for builders and engines

use ndarray::Array2;
use proptest::prelude::*;
use sparse_matvecs::{
    build_csr, build_csr_parallel, count_nnz, matvecs_csr, matvecs_csr_parallel, matvecs_dense,
    matvecs_dense_parallel,
};

/// Square matrix (mostly zeros), a matching vector, an iteration count and a thread count
fn inputs() -> impl Strategy<Value = (Array2<i64>, Vec<i64>, usize, usize)> {
    (1usize..16).prop_flat_map(|n| {
        (
            prop::collection::vec(prop_oneof![3 => Just(0i64), 1 => -9i64..10], n * n),
            prop::collection::vec(-5i64..5, n),
            0usize..6,
            1usize..=n,
        )
            .prop_map(move |(data, x, iterations, n_threads)| {
                let dense = Array2::from_shape_vec((n, n), data).unwrap();
                (dense, x, iterations, n_threads)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_build_matches_serial((dense, _x, _iterations, n_threads) in inputs()) {
        let nnz = count_nnz(dense.view());
        let serial = build_csr(dense.view(), nnz).unwrap();
        let parallel = build_csr_parallel(dense.view(), nnz, n_threads).unwrap();

        prop_assert_eq!(serial.values(), parallel.values());
        prop_assert_eq!(serial.col_index(), parallel.col_index());
        prop_assert_eq!(serial.row_ptr(), parallel.row_ptr());
    }

    #[test]
    fn row_ptr_is_monotone_and_ends_at_nnz((dense, _x, _iterations, n_threads) in inputs()) {
        let nnz = count_nnz(dense.view());
        let csr = build_csr_parallel(dense.view(), nnz, n_threads).unwrap();
        let row_ptr = csr.row_ptr();

        prop_assert!(row_ptr.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(row_ptr[csr.rows()], nnz);
        prop_assert_eq!(csr.to_dense(), dense);
    }

    #[test]
    fn every_engine_agrees((dense, x, iterations, n_threads) in inputs()) {
        let csr = build_csr(dense.view(), count_nnz(dense.view())).unwrap();
        let reference = matvecs_dense(dense.view(), &x, iterations).unwrap();

        prop_assert_eq!(&matvecs_csr(&csr, &x, iterations).unwrap(), &reference);
        prop_assert_eq!(&matvecs_dense_parallel(dense.view(), &x, iterations, n_threads).unwrap(), &reference);
        prop_assert_eq!(&matvecs_csr_parallel(&csr, &x, iterations, n_threads).unwrap(), &reference);
    }

    #[test]
    fn zero_iterations_is_identity((dense, x, _iterations, n_threads) in inputs()) {
        let csr = build_csr(dense.view(), count_nnz(dense.view())).unwrap();

        prop_assert_eq!(&matvecs_dense(dense.view(), &x, 0).unwrap(), &x);
        prop_assert_eq!(&matvecs_csr_parallel(&csr, &x, 0, n_threads).unwrap(), &x);
    }
}
