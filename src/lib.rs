//! # sparse_matvecs
//!
//! Parallel construction of Compressed Sparse Row (CSR) matrices from dense
//! integer matrices, and repeated matrix-vector products over dense or CSR
//! matrices, serially or with a team of threads.
//!
//! ## Overview
//!
//! - **CSR construction**: [`build_csr`] scans the dense matrix once;
//!   [`build_csr_parallel`] partitions the rows across threads, builds local
//!   pieces, stitches them with a prefix sum over per-thread nonzero counts, and
//!   scatters them into the shared arrays without locks.
//! - **Repeated products**: [`matvecs_dense`], [`matvecs_csr`] and their
//!   `_parallel` variants compute `A^k x` by applying `A` `k` times, ping-ponging
//!   between two buffers.
//! - **Validation**: [`vector_diffs`] counts mismatching positions of two results.
//!
//! All arithmetic is on integers and wraps on overflow, so every builder and
//! engine, serial or parallel, produces exactly the same bits.
//!
//! ## Usage
//!
//! ```
//! use ndarray::arr2;
//! use sparse_matvecs::{build_csr_parallel, count_nnz, matvecs_csr_parallel, matvecs_dense, vector_diffs};
//!
//! let dense = arr2(&[[0, 2, 0], [1, 0, 3], [0, 0, 4]]);
//! let nnz = count_nnz(dense.view());
//!
//! let csr = build_csr_parallel(dense.view(), nnz, 2).unwrap();
//! let x = [1, 1, 1];
//!
//! let sparse = matvecs_csr_parallel(&csr, &x, 2, 2).unwrap();
//! let reference = matvecs_dense(dense.view(), &x, 2).unwrap();
//!
//! assert_eq!(sparse, vec![8, 14, 16]);
//! assert_eq!(vector_diffs(&sparse, &reference), 0);
//! ```

pub mod compare;
pub mod error;
pub mod generate;
pub mod matrix;
pub mod matvec;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use compare::vector_diffs;
pub use error::{Error, Result};
pub use matrix::{build_csr, count_nnz, CsrMatrix, ExecutionConfig, GeneratorConfig, Scalar};
pub use matvec::{
    matvecs_csr, matvecs_csr_parallel, matvecs_dense, matvecs_dense_parallel, IterationBuffers,
    RowOperator,
};
pub use parallel::build_csr_parallel;
pub use utils::{from_sprs_csr, partition_rows, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
