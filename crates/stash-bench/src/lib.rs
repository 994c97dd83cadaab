//! Deterministic input fixtures for the container benchmarks.
//!
//! Both benches draw from a seeded [`ChaCha8Rng`] so runs are comparable
//! across machines and commits.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic shuffled integers in `0..bound`.
pub fn shuffled_ints(n: usize, bound: i64, seed: u64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..bound)).collect()
}

/// Deterministic byte payloads, each 1..=16 bytes long.
pub fn byte_payloads(n: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let len = rng.random_range(1..=16usize);
            (0..len).map(|_| rng.random::<u8>()).collect()
        })
        .collect()
}
