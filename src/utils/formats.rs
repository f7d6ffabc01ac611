//! Utilities for converting between our CSR format and sprs

use sprs::CsMat;

use crate::error::{Error, Result};
use crate::matrix::{CsrMatrix, Scalar};

/// Converts our CSR matrix to sprs CsMat format
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> CsMat<T>
where
    T: Scalar + Default,
{
    CsMat::new(
        (matrix.rows(), matrix.rows()),
        matrix.row_ptr().to_vec(),
        matrix.col_index().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts sprs CsMat to our CsrMatrix format
///
/// CSC input is converted to CSR first. Explicitly stored zeros are kept.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Scalar + Default,
{
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }

    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::try_new(rows, indptr, indices, data)
}
