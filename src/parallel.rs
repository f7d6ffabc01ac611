//! # Parallel dense to CSR construction
//!
//! Each call spawns its own fork-join team (a scoped Rayon pool sized to the
//! requested thread count) whose workers are joined before the call returns.
//! Rows are statically partitioned with [`partition_rows`], and the build runs
//! in three phases:
//!
//! 1. **Local build**: every partition scans its rows into private buffers, with
//!    row offsets relative to its own first nonzero.
//! 2. **Prefix stitch**: once all local totals are known, an exclusive scan over
//!    the per-partition counts yields each partition's base offset. This is the
//!    only serial step and costs O(thread count).
//! 3. **Scatter**: every partition copies its buffers into a disjoint window of the
//!    shared arrays and writes its own slice of `row_ptr`, shifted by its base.
//!
//! The join at the end of each parallel phase is the barrier between phases. The
//! shared arrays are cut into disjoint `&mut` windows up front, so the scatter
//! needs no locks or atomics.

use std::ops::Range;

use log::trace;
use ndarray::ArrayView2;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};
use crate::matrix::conversion::{check_nnz, push_row, row_nnz, square_dim};
use crate::matrix::{CsrMatrix, Scalar};
use crate::utils::{exclusive_scan, partition_rows, split_mut_by_lengths};

/// Runs `f` on a fork-join team of exactly `n_threads` workers
///
/// The workers live in a `std::thread::scope`, so every one of them has exited
/// by the time this returns.
pub(crate) fn with_thread_team<R>(n_threads: usize, f: impl FnOnce(&ThreadPool) -> R) -> Result<R> {
    if n_threads == 0 {
        return Err(Error::InvalidThreadCount);
    }

    let out = ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("matvecs-worker-{}", i))
        .build_scoped(|worker| worker.run(), f)?;
    Ok(out)
}

/// One partition's share of the CSR arrays, before stitching
struct LocalCsr<T> {
    values: Vec<T>,
    col_index: Vec<usize>,
    /// End offset of each row, relative to this partition's first nonzero
    row_ends: Vec<usize>,
}

impl<T: Scalar> LocalCsr<T> {
    /// Scans `rows` of the dense matrix: count first, then fill exactly-sized buffers
    fn scan(matrix: &ArrayView2<'_, T>, rows: Range<usize>) -> Self {
        let mut row_ends = Vec::with_capacity(rows.len());
        let mut running = 0;
        for i in rows.clone() {
            running += row_nnz(matrix.row(i));
            row_ends.push(running);
        }

        let mut values = Vec::with_capacity(running);
        let mut col_index = Vec::with_capacity(running);
        for i in rows {
            push_row(matrix.row(i), &mut values, &mut col_index);
        }

        Self {
            values,
            col_index,
            row_ends,
        }
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }
}

/// Builds the CSR representation of a square dense matrix with a team of threads
///
/// The result is identical to [`build_csr`](crate::build_csr) for every thread
/// count. More threads than rows is allowed; the surplus partitions are empty.
///
/// # Arguments
///
/// * `matrix` - Square dense input
/// * `nnz_expected` - Declared number of nonzero entries
/// * `n_threads` - Team size
///
/// # Errors
///
/// * [`Error::NotSquare`] if the input is not square
/// * [`Error::InvalidThreadCount`] if `n_threads` is zero
/// * [`Error::SizeMismatch`] if the nonzeros found differ from `nnz_expected`
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use sparse_matvecs::{build_csr, build_csr_parallel};
///
/// let dense = arr2(&[[0, 2, 0], [1, 0, 3], [0, 0, 4]]);
/// let parallel = build_csr_parallel(dense.view(), 4, 2).unwrap();
///
/// assert_eq!(parallel, build_csr(dense.view(), 4).unwrap());
/// assert_eq!(parallel.row_ptr(), &[0, 1, 3, 4]);
/// ```
pub fn build_csr_parallel<T: Scalar>(
    matrix: ArrayView2<'_, T>,
    nnz_expected: usize,
    n_threads: usize,
) -> Result<CsrMatrix<T>> {
    if n_threads == 0 {
        return Err(Error::InvalidThreadCount);
    }
    let rows = square_dim(&matrix)?;
    let partitions = partition_rows(rows, n_threads);

    with_thread_team(n_threads, |team| {
        team.install(|| -> Result<CsrMatrix<T>> {
            // 1. Local build
            let locals: Vec<LocalCsr<T>> = partitions
                .par_iter()
                .map(|range| LocalCsr::scan(&matrix, range.clone()))
                .collect();

            // 2. Prefix stitch
            let counts: Vec<usize> = locals.iter().map(LocalCsr::nnz).collect();
            let offsets = exclusive_scan(&counts);
            let counted = offsets[counts.len()];
            trace!("partition nnz = {:?}, base offsets = {:?}", counts, offsets);

            check_nnz(nnz_expected, counted)?;

            // 3. Scatter
            let mut values = vec![T::zero(); counted];
            let mut col_index = vec![0; counted];
            let mut row_ptr = vec![0; rows + 1];

            let row_counts: Vec<usize> = partitions.iter().map(|range| range.len()).collect();
            let value_windows = split_mut_by_lengths(&mut values, &counts);
            let col_windows = split_mut_by_lengths(&mut col_index, &counts);
            let ptr_windows = split_mut_by_lengths(&mut row_ptr[1..], &row_counts);

            locals
                .into_par_iter()
                .zip(offsets[..counts.len()].par_iter())
                .zip(value_windows)
                .zip(col_windows)
                .zip(ptr_windows)
                .for_each(|((((local, &base), vals), cols), ptrs)| {
                    vals.copy_from_slice(&local.values);
                    cols.copy_from_slice(&local.col_index);
                    for (slot, &end) in ptrs.iter_mut().zip(&local.row_ends) {
                        *slot = base + end;
                    }
                });

            Ok(CsrMatrix::from_parts(rows, row_ptr, col_index, values))
        })
    })?
}
