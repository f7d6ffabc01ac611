//! Repeated products with a CSR matrix
//!
//! Each output index only touches the nonzero run of its row,
//! `row_ptr[i]..row_ptr[i + 1]`.

use crate::error::Result;
use crate::matrix::{CsrMatrix, Scalar};
use crate::matvec::{apply_parallel, apply_serial, RowOperator};

impl<T: Scalar> RowOperator<T> for CsrMatrix<T> {
    fn dim(&self) -> usize {
        self.rows()
    }

    #[inline]
    fn row_dot(&self, row: usize, x: &[T]) -> T {
        let run = self.row_ptr()[row]..self.row_ptr()[row + 1];
        self.values()[run.clone()]
            .iter()
            .zip(&self.col_index()[run])
            .fold(T::zero(), |acc, (val, &col)| {
                acc.wrapping_add(&val.wrapping_mul(&x[col]))
            })
    }
}

/// Applies a CSR matrix to `x` `iterations` times on the calling thread
///
/// Returns a copy of `x` when `iterations` is zero.
///
/// # Errors
///
/// [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if `x` has the wrong length
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use sparse_matvecs::{build_csr, matvecs_csr};
///
/// let a = build_csr(arr2(&[[0, 2, 0], [1, 0, 3], [0, 0, 4]]).view(), 4).unwrap();
/// assert_eq!(matvecs_csr(&a, &[1, 1, 1], 2).unwrap(), vec![8, 14, 16]);
/// ```
pub fn matvecs_csr<T: Scalar>(matrix: &CsrMatrix<T>, x: &[T], iterations: usize) -> Result<Vec<T>> {
    apply_serial(matrix, x, iterations)
}

/// Parallel version of [`matvecs_csr`] using a team of `n_threads` threads
///
/// The result is identical to [`matvecs_csr`] for every thread count.
pub fn matvecs_csr_parallel<T: Scalar>(
    matrix: &CsrMatrix<T>,
    x: &[T],
    iterations: usize,
    n_threads: usize,
) -> Result<Vec<T>> {
    apply_parallel(matrix, x, iterations, n_threads)
}
