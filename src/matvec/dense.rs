//! Repeated products with a dense row-major matrix

use ndarray::ArrayView2;

use crate::error::Result;
use crate::matrix::conversion::square_dim;
use crate::matrix::Scalar;
use crate::matvec::{apply_parallel, apply_serial, RowOperator};

/// Full-row dot products over a square dense view
struct DenseRows<'a, T> {
    matrix: ArrayView2<'a, T>,
}

impl<'a, T: Scalar> DenseRows<'a, T> {
    fn new(matrix: ArrayView2<'a, T>) -> Result<Self> {
        square_dim(&matrix)?;
        Ok(Self { matrix })
    }
}

impl<T: Scalar> RowOperator<T> for DenseRows<'_, T> {
    fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    #[inline]
    fn row_dot(&self, row: usize, x: &[T]) -> T {
        self.matrix
            .row(row)
            .iter()
            .zip(x)
            .fold(T::zero(), |acc, (a, b)| acc.wrapping_add(&a.wrapping_mul(b)))
    }
}

/// Applies a square dense matrix to `x` `iterations` times on the calling thread
///
/// Returns a copy of `x` when `iterations` is zero.
///
/// # Errors
///
/// * [`Error::NotSquare`](crate::Error::NotSquare) if the matrix is not square
/// * [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if `x` has the wrong length
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use sparse_matvecs::matvecs_dense;
///
/// let a = arr2(&[[0, 2, 0], [1, 0, 3], [0, 0, 4]]);
/// assert_eq!(matvecs_dense(a.view(), &[1, 1, 1], 2).unwrap(), vec![8, 14, 16]);
/// ```
pub fn matvecs_dense<T: Scalar>(matrix: ArrayView2<'_, T>, x: &[T], iterations: usize) -> Result<Vec<T>> {
    apply_serial(&DenseRows::new(matrix)?, x, iterations)
}

/// Parallel version of [`matvecs_dense`] using a team of `n_threads` threads
///
/// The result is identical to [`matvecs_dense`] for every thread count.
pub fn matvecs_dense_parallel<T: Scalar>(
    matrix: ArrayView2<'_, T>,
    x: &[T],
    iterations: usize,
    n_threads: usize,
) -> Result<Vec<T>> {
    apply_parallel(&DenseRows::new(matrix)?, x, iterations, n_threads)
}
