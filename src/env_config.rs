//! Shared environment configuration for the binaries.
//!
//! Consolidates `YAHTZEE_PORT`, `YAHTZEE_SEED`, `RAYON_NUM_THREADS` and
//! `RUST_LOG` reads.

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Read `YAHTZEE_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("YAHTZEE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}

/// Read `YAHTZEE_SEED`. Unset or unparsable means seed from OS entropy.
pub fn dice_seed() -> Option<u64> {
    std::env::var("YAHTZEE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8).
/// Builds the rayon global thread pool, tolerating one that is already
/// initialized. Returns thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    info!(threads = num_threads, "rayon thread pool");
    num_threads
}
