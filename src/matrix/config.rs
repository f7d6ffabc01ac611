//! Configuration for engine runs and input generation

use crate::error::{Error, Result};

/// How the engines and the parallel builder are run
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Number of threads in each fork-join team
    pub n_threads: usize,
    /// Number of repeated matrix-vector products
    pub iterations: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            iterations: 1,
        }
    }
}

impl ExecutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_threads == 0 {
            return Err(Error::InvalidThreadCount);
        }
        Ok(())
    }
}

/// Parameters for random test inputs
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Row and column count of the square matrix
    pub size: usize,
    /// Probability that a matrix entry is zero, in [0, 1)
    pub sparsity: f64,
    /// Exclusive upper bound of generated matrix values
    pub max_value: i32,
    /// Fixed seed for reproducible inputs; drawn from entropy when None
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            sparsity: 0.9,
            max_value: 10,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidConfig("matrix size must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.sparsity) {
            return Err(Error::InvalidConfig(format!(
                "sparsity must be in [0, 1), got {}",
                self.sparsity
            )));
        }
        if self.max_value < 2 {
            return Err(Error::InvalidConfig(format!(
                "max value must be at least 2, got {}",
                self.max_value
            )));
        }
        Ok(())
    }
}
