// Matrix data structures and dense to CSR conversion

pub mod config;
pub mod conversion;
pub mod csr;

use std::fmt::Debug;

use num_traits::{PrimInt, WrappingAdd, WrappingMul};

pub use config::{ExecutionConfig, GeneratorConfig};
pub use conversion::{build_csr, count_nnz};
pub use csr::CsrMatrix;

/// Element type of matrices and vectors
///
/// Products and sums wrap on overflow, so every execution mode produces the
/// same bits for the same input.
pub trait Scalar: PrimInt + WrappingAdd + WrappingMul + Send + Sync + Debug {}

impl<T> Scalar for T where T: PrimInt + WrappingAdd + WrappingMul + Send + Sync + Debug {}
