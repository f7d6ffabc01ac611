//! Error types for sparse_matvecs

use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building CSR matrices or applying them
#[derive(Error, Debug)]
pub enum Error {
    /// The number of nonzeros found in the dense input differs from the declared count.
    /// No matrix is produced.
    #[error("nnz mismatch: declared {expected}, counted {counted}")]
    SizeMismatch {
        /// Declared nonzero count
        expected: usize,
        /// Nonzeros actually found in the input
        counted: usize,
    },

    /// Vector length disagrees with the matrix dimension
    #[error("dimension mismatch: matrix is {expected}x{expected}, vector has {got} elements")]
    DimensionMismatch {
        /// Matrix dimension
        expected: usize,
        /// Vector length
        got: usize,
    },

    /// Input matrix is not square
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// A thread team needs at least one thread
    #[error("thread count must be positive")]
    InvalidThreadCount,

    /// Raw CSR parts violate the format's invariants
    #[error("malformed CSR structure: {0}")]
    MalformedCsr(String),

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker team could not be spawned
    #[error("failed to build thread team: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
