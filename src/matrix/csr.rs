//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::matrix::Scalar;

/// A square sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size rows + 1 containing offsets into col_index and values
/// - col_index: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within each row the column indices are strictly increasing. A matrix is
/// read-only once constructed; the parts are only reachable through accessors.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrMatrix<T> {
    rows: usize,
    row_ptr: Vec<usize>,
    col_index: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Creates a CSR matrix from raw parts, checking every format invariant
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows (and columns)
    /// * `row_ptr` - Row offsets
    /// * `col_index` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCsr`] if:
    /// - row_ptr.len() is not rows + 1, or row_ptr[0] is not 0
    /// - col_index.len() differs from values.len()
    /// - row_ptr decreases anywhere, or row_ptr[rows] differs from nnz
    /// - a column index is out of bounds or columns within a row are not strictly increasing
    pub fn try_new(
        rows: usize,
        row_ptr: Vec<usize>,
        col_index: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let Some(ptr_len) = rows.checked_add(1) else {
            return Err(Error::MalformedCsr(format!("row count {} is too large", rows)));
        };
        if row_ptr.len() != ptr_len {
            return Err(Error::MalformedCsr(format!(
                "row_ptr has {} entries, expected {}",
                row_ptr.len(),
                ptr_len
            )));
        }
        if col_index.len() != values.len() {
            return Err(Error::MalformedCsr(format!(
                "col_index has {} entries but values has {}",
                col_index.len(),
                values.len()
            )));
        }
        if row_ptr[0] != 0 {
            return Err(Error::MalformedCsr("row_ptr[0] must be 0".into()));
        }
        if row_ptr[rows] != values.len() {
            return Err(Error::MalformedCsr(format!(
                "row_ptr[{}] = {} but nnz = {}",
                rows,
                row_ptr[rows],
                values.len()
            )));
        }

        for i in 0..rows {
            let (start, end) = (row_ptr[i], row_ptr[i + 1]);
            if start > end {
                return Err(Error::MalformedCsr(format!(
                    "row_ptr decreases at row {}",
                    i
                )));
            }

            let cols = &col_index[start..end];
            if let Some(&col) = cols.iter().find(|&&col| col >= rows) {
                return Err(Error::MalformedCsr(format!(
                    "column index {} out of bounds in row {} (dimension {})",
                    col, i, rows
                )));
            }
            if cols.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(Error::MalformedCsr(format!(
                    "column indices of row {} are not strictly increasing",
                    i
                )));
            }
        }

        Ok(Self::from_parts(rows, row_ptr, col_index, values))
    }

    /// Assembles a matrix from parts the caller has already built consistently
    pub(crate) fn from_parts(
        rows: usize,
        row_ptr: Vec<usize>,
        col_index: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row_ptr.len(), rows + 1);
        debug_assert_eq!(row_ptr[rows], values.len());
        debug_assert_eq!(col_index.len(), values.len());

        Self {
            rows,
            row_ptr,
            col_index,
            values,
        }
    }

    /// Number of rows, which is also the number of columns
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn col_index(&self) -> &[usize] {
        &self.col_index
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_index, value), in increasing column order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        assert!(i < self.rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_index[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, &val)| (col, val))
    }

    /// Creates an empty matrix with the given dimension
    pub fn zeros(n: usize) -> Self {
        Self::from_parts(n, vec![0; n + 1], Vec::new(), Vec::new())
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::from_parts(n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }

    /// Expands the matrix back into a dense row-major array
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::zeros((self.rows, self.rows));
        for i in 0..self.rows {
            for (j, val) in self.row_iter(i) {
                dense[[i, j]] = val;
            }
        }
        dense
    }
}

impl<T: Scalar> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.rows, self.rows)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.col_index[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

/// Prints the three CSR arrays in full
impl<T: Scalar> fmt::Display for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nnz       = {}", self.nnz())?;
        writeln!(f, "values    = {:?}", self.values)?;
        writeln!(f, "col_index = {:?}", self.col_index)?;
        write!(f, "row_ptr   = {:?}", self.row_ptr)
    }
}
