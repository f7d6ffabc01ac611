//! # Repeated matrix-vector products
//!
//! Both engines compute `A^k x` by applying `A` to the vector `k` times in
//! sequence. The work is described by [`RowOperator`]: a square operator that can
//! produce the dot product of one of its rows with a vector. Dense matrices and
//! [`CsrMatrix`](crate::CsrMatrix) both implement it, and the iteration drivers
//! below are shared.
//!
//! Iteration state lives in an [`IterationBuffers`] pair. In round `r` buffer
//! `r % 2` is read and buffer `(r + 1) % 2` is written, so the roles rotate by
//! index and no buffer is ever copied between rounds.
//!
//! In parallel mode the output indices are partitioned into contiguous row
//! ranges, one per thread. Each round the write buffer is cut into disjoint
//! windows, one per range, while all threads share the read buffer. The round
//! ends when every window has been written, which is the barrier before the
//! next round may read it.

pub mod csr;
pub mod dense;

pub use csr::{matvecs_csr, matvecs_csr_parallel};
pub use dense::{matvecs_dense, matvecs_dense_parallel};

use log::trace;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::Scalar;
use crate::parallel::with_thread_team;
use crate::utils::{partition_rows, split_mut_by_lengths};

/// A square operator evaluated one output row at a time
pub trait RowOperator<T>: Sync {
    /// Number of rows, equal to the number of columns
    fn dim(&self) -> usize;

    /// Dot product of row `row` with `x`, using wrapping arithmetic
    ///
    /// `x.len()` equals [`dim`](RowOperator::dim).
    fn row_dot(&self, row: usize, x: &[T]) -> T;
}

/// Two vectors of operator length whose read/write roles alternate by round
pub struct IterationBuffers<T> {
    buffers: [Vec<T>; 2],
}

impl<T: Scalar> IterationBuffers<T> {
    /// Copies `initial` into buffer 0; buffer 1 starts zeroed
    pub fn new(initial: &[T]) -> Self {
        Self {
            buffers: [initial.to_vec(), vec![T::zero(); initial.len()]],
        }
    }

    /// Returns `(read, write)` for round `round`
    pub fn split(&mut self, round: usize) -> (&[T], &mut [T]) {
        let [even, odd] = &mut self.buffers;
        if round % 2 == 0 {
            (even.as_slice(), odd.as_mut_slice())
        } else {
            (odd.as_slice(), even.as_mut_slice())
        }
    }

    /// Consumes the pair, handing back the result after `rounds` rounds
    pub fn into_latest(self, rounds: usize) -> Vec<T> {
        let [even, odd] = self.buffers;
        if rounds % 2 == 0 {
            even
        } else {
            odd
        }
    }
}

/// Rejects vectors whose length differs from the operator dimension
fn check_dims<T, A: RowOperator<T> + ?Sized>(op: &A, x: &[T]) -> Result<()> {
    if x.len() != op.dim() {
        return Err(Error::DimensionMismatch {
            expected: op.dim(),
            got: x.len(),
        });
    }
    Ok(())
}

/// Applies `op` to `x` `iterations` times on the calling thread
pub fn apply_serial<T, A>(op: &A, x: &[T], iterations: usize) -> Result<Vec<T>>
where
    T: Scalar,
    A: RowOperator<T> + ?Sized,
{
    check_dims(op, x)?;
    if iterations == 0 {
        return Ok(x.to_vec());
    }

    let mut buffers = IterationBuffers::new(x);
    for round in 0..iterations {
        let (read, write) = buffers.split(round);
        for (i, out) in write.iter_mut().enumerate() {
            *out = op.row_dot(i, read);
        }
        trace!("round {} done", round);
    }

    Ok(buffers.into_latest(iterations))
}

/// Applies `op` to `x` `iterations` times with a team of `n_threads` threads
///
/// One thread runs [`apply_serial`] directly, without spawning a team.
pub fn apply_parallel<T, A>(op: &A, x: &[T], iterations: usize, n_threads: usize) -> Result<Vec<T>>
where
    T: Scalar,
    A: RowOperator<T> + ?Sized,
{
    if n_threads == 0 {
        return Err(Error::InvalidThreadCount);
    }
    check_dims(op, x)?;
    if n_threads == 1 {
        return apply_serial(op, x, iterations);
    }
    if iterations == 0 {
        return Ok(x.to_vec());
    }

    let partitions = partition_rows(op.dim(), n_threads);
    let lengths: Vec<usize> = partitions.iter().map(|range| range.len()).collect();

    let mut buffers = IterationBuffers::new(x);
    with_thread_team(n_threads, |team| {
        team.install(|| {
            for round in 0..iterations {
                let (read, write) = buffers.split(round);
                let windows = split_mut_by_lengths(write, &lengths);

                windows
                    .into_par_iter()
                    .zip(partitions.par_iter())
                    .for_each(|(window, range)| {
                        for (out, i) in window.iter_mut().zip(range.clone()) {
                            *out = op.row_dot(i, read);
                        }
                    });
                trace!("round {} done on {} threads", round, n_threads);
            }
        })
    })?;

    Ok(buffers.into_latest(iterations))
}
