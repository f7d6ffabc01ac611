use std::process;
use std::time::Instant;

use log::{error, info};
use structopt::StructOpt;

use sparse_matvecs::generate::{gen_sparse_matrix, gen_vector, rng_for};
use sparse_matvecs::{
    build_csr, build_csr_parallel, matvecs_csr, matvecs_csr_parallel, matvecs_dense,
    matvecs_dense_parallel, vector_diffs, ExecutionConfig, GeneratorConfig, Result,
};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sparse-matvecs",
    about = "Builds a CSR matrix from a random dense one and compares serial and parallel repeated products"
)]
struct Opt {
    /// Row/column size of the square matrix
    matrix_size: usize,

    /// Fraction of zero entries, in [0, 1)
    sparsity: f64,

    /// Number of repeated multiplications
    iterations: usize,

    /// Number of threads for the parallel runs
    threads: usize,

    /// Seed for reproducible inputs
    #[structopt(long)]
    seed: Option<u64>,

    /// Exclusive upper bound of generated values
    #[structopt(long, default_value = "10")]
    max_value: i32,
}

/// Runs `f` and returns its output with the elapsed seconds
fn timed<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64())
}

/// Logs whether two result vectors agree; returns false on mismatch
fn report(label: &str, a: &[i32], b: &[i32]) -> bool {
    let n_errors = vector_diffs(a, b);
    if n_errors == 0 {
        info!("{}: results match", label);
        true
    } else {
        error!("{}: results mismatch, # of errors = {}", label, n_errors);
        false
    }
}

fn run(opt: Opt) -> Result<bool> {
    let gen_config = GeneratorConfig {
        size: opt.matrix_size,
        sparsity: opt.sparsity,
        max_value: opt.max_value,
        seed: opt.seed,
    };
    let exec = ExecutionConfig {
        n_threads: opt.threads,
        iterations: opt.iterations,
    };
    gen_config.validate()?;
    exec.validate()?;

    println!(
        "Square matrix NxN with N={}, sparsity={}\nRepeated multiplications: {}\nThread count: {}",
        gen_config.size, gen_config.sparsity, exec.iterations, exec.n_threads
    );

    let mut rng = rng_for(&gen_config);
    let (generated, secs) = timed(|| gen_sparse_matrix(&gen_config, exec.n_threads, &mut rng));
    let (dense, nnz) = generated?;
    info!("matrix generated in {:.6} s, nnz = {}", secs, nnz);
    let x = gen_vector(gen_config.size, gen_config.max_value, &mut rng);

    let mut all_match = true;

    // CSR construction
    let (serial_csr, secs) = timed(|| build_csr(dense.view(), nnz));
    let serial_csr = serial_csr?;
    println!("Serial CSR build time (s):   {:9.6}", secs);

    let (parallel_csr, secs) = timed(|| build_csr_parallel(dense.view(), nnz, exec.n_threads));
    let parallel_csr = parallel_csr?;
    println!("Parallel CSR build time (s): {:9.6}", secs);

    if serial_csr == parallel_csr {
        info!("CSR builds match");
    } else {
        error!("CSR builds don't match");
        all_match = false;
    }

    // Dense products
    let (dense_serial, secs) = timed(|| matvecs_dense(dense.view(), &x, exec.iterations));
    let dense_serial = dense_serial?;
    println!("Dense {}x mult serial time (s):   {:9.6}", exec.iterations, secs);

    let (dense_parallel, secs) =
        timed(|| matvecs_dense_parallel(dense.view(), &x, exec.iterations, exec.n_threads));
    let dense_parallel = dense_parallel?;
    println!("Dense {}x mult parallel time (s): {:9.6}", exec.iterations, secs);

    all_match &= report("dense serial vs parallel", &dense_serial, &dense_parallel);

    // Sparse products
    let (sparse_serial, secs) = timed(|| matvecs_csr(&serial_csr, &x, exec.iterations));
    let sparse_serial = sparse_serial?;
    println!("Sparse {}x mult serial time (s):   {:9.6}", exec.iterations, secs);

    let (sparse_parallel, secs) =
        timed(|| matvecs_csr_parallel(&serial_csr, &x, exec.iterations, exec.n_threads));
    let sparse_parallel = sparse_parallel?;
    println!("Sparse {}x mult parallel time (s): {:9.6}", exec.iterations, secs);

    all_match &= report("sparse serial vs parallel", &sparse_serial, &sparse_parallel);
    all_match &= report("dense vs sparse (parallel)", &dense_parallel, &sparse_parallel);

    Ok(all_match)
}

fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    match run(opt) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            process::exit(2);
        }
    }
}
