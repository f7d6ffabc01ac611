//! Dense to CSR conversion
//!
//! [`build_csr`] is the single-threaded builder. It is also the reference the
//! parallel builder is checked against.

use log::{debug, warn};
use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::matrix::{CsrMatrix, Scalar};

/// Returns the dimension of a square matrix, or [`Error::NotSquare`]
pub(crate) fn square_dim<T>(matrix: &ArrayView2<'_, T>) -> Result<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Number of nonzero entries in one dense row
pub(crate) fn row_nnz<T: Scalar>(row: ArrayView1<'_, T>) -> usize {
    row.iter().filter(|v| !v.is_zero()).count()
}

/// Appends the nonzeros of `row` to `values`/`col_index` in column order
pub(crate) fn push_row<T: Scalar>(
    row: ArrayView1<'_, T>,
    values: &mut Vec<T>,
    col_index: &mut Vec<usize>,
) {
    for (j, &val) in row.iter().enumerate() {
        if !val.is_zero() {
            values.push(val);
            col_index.push(j);
        }
    }
}

/// Rejects a build whose counted nonzeros disagree with the declared total
pub(crate) fn check_nnz(expected: usize, counted: usize) -> Result<()> {
    if counted != expected {
        warn!(
            "CSR build rejected: declared nnz = {}, counted nnz = {}",
            expected, counted
        );
        return Err(Error::SizeMismatch { expected, counted });
    }
    debug!("CSR representation built, nnz = {}", counted);
    Ok(())
}

/// Counts the nonzero entries of a dense matrix
pub fn count_nnz<T: Scalar>(matrix: ArrayView2<'_, T>) -> usize {
    matrix.rows().into_iter().map(row_nnz).sum()
}

/// Builds the CSR representation of a square dense matrix in one row-major pass
///
/// # Arguments
///
/// * `matrix` - Square dense input
/// * `nnz_expected` - Declared number of nonzero entries
///
/// # Errors
///
/// * [`Error::NotSquare`] if the input is not square
/// * [`Error::SizeMismatch`] if the nonzeros found differ from `nnz_expected`
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use sparse_matvecs::build_csr;
///
/// let dense = arr2(&[[0, 2, 0], [1, 0, 3], [0, 0, 4]]);
/// let csr = build_csr(dense.view(), 4).unwrap();
///
/// assert_eq!(csr.values(), &[2, 1, 3, 4]);
/// assert_eq!(csr.col_index(), &[1, 0, 2, 2]);
/// assert_eq!(csr.row_ptr(), &[0, 1, 3, 4]);
/// ```
pub fn build_csr<T: Scalar>(matrix: ArrayView2<'_, T>, nnz_expected: usize) -> Result<CsrMatrix<T>> {
    let rows = square_dim(&matrix)?;

    let mut row_ptr = Vec::with_capacity(rows + 1);
    let mut col_index = Vec::with_capacity(nnz_expected);
    let mut values = Vec::with_capacity(nnz_expected);

    row_ptr.push(0);
    for row in matrix.rows() {
        push_row(row, &mut values, &mut col_index);
        row_ptr.push(values.len());
    }

    check_nnz(nnz_expected, values.len())?;

    Ok(CsrMatrix::from_parts(rows, row_ptr, col_index, values))
}
