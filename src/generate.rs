//! Random inputs for the builders and engines
//!
//! A matrix entry is zero when a uniform draw from `[0, 1)` falls below the
//! configured sparsity, so the expected fraction of zeros equals the sparsity.
//! Nonzero entries are uniform in `1..max_value`. The generator reports the
//! number of nonzeros it actually produced.
//!
//! Matrix rows are filled in parallel. Row `i` draws from its own ChaCha stream
//! `i` under a base seed taken from the caller's generator, so a seeded matrix
//! is the same for every thread count.

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::matrix::GeneratorConfig;
use crate::parallel::with_thread_team;

/// Creates the generator for `config`, seeded from entropy when no seed is set
pub fn rng_for(config: &GeneratorConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Generates a square sparse matrix and its true nonzero count using `n_threads` threads
///
/// Draws exactly one value from `rng`, so the caller's stream stays usable for
/// the vector that follows.
pub fn gen_sparse_matrix<R: Rng>(
    config: &GeneratorConfig,
    n_threads: usize,
    rng: &mut R,
) -> Result<(Array2<i32>, usize)> {
    config.validate()?;

    let size = config.size;
    let base: u64 = rng.gen();
    let len = size
        .checked_mul(size)
        .ok_or_else(|| Error::InvalidConfig(format!("size {} is too large", size)))?;
    let mut data = vec![0i32; len];

    let nnz = with_thread_team(n_threads, |team| {
        team.install(|| {
            data.par_chunks_mut(size)
                .enumerate()
                .map(|(i, row)| {
                    let mut row_rng = ChaCha8Rng::seed_from_u64(base);
                    row_rng.set_stream(i as u64);
                    let mut row_nnz = 0;
                    for entry in row.iter_mut() {
                        if row_rng.gen::<f64>() >= config.sparsity {
                            *entry = row_rng.gen_range(1..config.max_value);
                            row_nnz += 1;
                        }
                    }
                    row_nnz
                })
                .sum::<usize>()
        })
    })?;

    let matrix = Array2::from_shape_vec((size, size), data)
        .map_err(|err| Error::InvalidConfig(err.to_string()))?;
    Ok((matrix, nnz))
}

/// Generates a vector with entries uniform in `[-max_value / 2, max_value - max_value / 2)`
pub fn gen_vector<R: Rng>(size: usize, max_value: i32, rng: &mut R) -> Vec<i32> {
    let half = max_value / 2;
    (0..size)
        .map(|_| rng.gen_range(0..max_value.max(1)) - half)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::count_nnz;

    fn seeded(size: usize, sparsity: f64) -> GeneratorConfig {
        GeneratorConfig {
            size,
            sparsity,
            max_value: 10,
            seed: Some(42),
        }
    }

    #[test]
    fn test_reported_nnz_is_exact() {
        let config = seeded(50, 0.7);
        let (matrix, nnz) = gen_sparse_matrix(&config, 4, &mut rng_for(&config)).unwrap();

        assert_eq!(matrix.dim(), (50, 50));
        assert_eq!(count_nnz(matrix.view()), nnz);
        assert!(matrix.iter().all(|&v| (0..10).contains(&v)));
    }

    #[test]
    fn test_zero_sparsity_is_fully_dense() {
        let config = seeded(8, 0.0);
        let (_, nnz) = gen_sparse_matrix(&config, 4, &mut rng_for(&config)).unwrap();
        assert_eq!(nnz, 64);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = seeded(20, 0.5);
        let first = gen_sparse_matrix(&config, 4, &mut rng_for(&config)).unwrap();
        let second = gen_sparse_matrix(&config, 4, &mut rng_for(&config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_matrix_for_every_thread_count() {
        let config = seeded(37, 0.6);
        let expected = gen_sparse_matrix(&config, 1, &mut rng_for(&config)).unwrap();
        for n_threads in [2, 3, 8, 40] {
            let (matrix, nnz) = gen_sparse_matrix(&config, n_threads, &mut rng_for(&config)).unwrap();
            assert_eq!(matrix, expected.0, "n_threads = {}", n_threads);
            assert_eq!(nnz, expected.1);
        }
    }

    #[test]
    fn test_rows_draw_distinct_streams() {
        let config = seeded(16, 0.0);
        let (matrix, _) = gen_sparse_matrix(&config, 2, &mut rng_for(&config)).unwrap();
        assert_ne!(matrix.row(0), matrix.row(1));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = seeded(4, 0.5);
        assert!(matches!(
            gen_sparse_matrix(&config, 0, &mut rng_for(&config)),
            Err(Error::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = seeded(0, 0.5);
        assert!(gen_sparse_matrix(&config, 4, &mut rng_for(&config)).is_err());
    }

    #[test]
    fn test_vector_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let v = gen_vector(200, 10, &mut rng);
        assert_eq!(v.len(), 200);
        assert!(v.iter().all(|&x| (-5..5).contains(&x)));
    }
}
