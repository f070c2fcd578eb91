//! Seeded standard-normal sample sequences.
//!
//! Every generator takes an explicit seed; there is no global RNG state, so
//! a fixed seed reproduces the exact same sequence on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::math::norm_inv;

/// Sampling policy for a normal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleScheme {
    /// Plain pseudo-random draws.
    Pseudo,
    /// Paired draws (z, -z).
    Antithetic,
    /// One uniform draw per stratum of [0, 1], mapped through the inverse CDF.
    Stratified,
    /// Deterministic Van der Corput sequence mapped through the inverse CDF.
    QuasiRandom,
}

/// Generate `n` standard-normal samples under the given scheme.
pub fn draws(scheme: SampleScheme, n: usize, seed: u64) -> Vec<f64> {
    match scheme {
        SampleScheme::Pseudo => normal_draws(n, seed),
        SampleScheme::Antithetic => antithetic_draws(n, seed),
        SampleScheme::Stratified => stratified_draws(n, seed),
        SampleScheme::QuasiRandom => quasi_draws(n),
    }
}

/// Plain seeded pseudo-random normal samples.
pub fn normal_draws(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.sample(StandardNormal)).collect()
}

/// Antithetic pairs: each base draw z also contributes -z. Halves the number
/// of independent samples while keeping the estimator unbiased; an odd tail
/// slot gets one extra independent draw.
pub fn antithetic_draws(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = vec![0.0; n];
    for i in 0..n / 2 {
        let z: f64 = rng.sample(StandardNormal);
        samples[2 * i] = z;
        samples[2 * i + 1] = -z;
    }
    if n % 2 != 0 {
        samples[n - 1] = rng.sample(StandardNormal);
    }
    samples
}

/// Stratified sampling: [0, 1] split into `n` equal strata with one uniform
/// draw each, guaranteeing coverage across the whole distribution.
pub fn stratified_draws(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let u = (i as f64 + rng.gen::<f64>()) / n as f64;
            norm_inv(u)
        })
        .collect()
}

/// Quasi-random samples from a base-2 Van der Corput sequence. Fully
/// deterministic; the seed is not used.
pub fn quasi_draws(n: usize) -> Vec<f64> {
    (0..n).map(|i| norm_inv(van_der_corput(i + 1, 2))).collect()
}

fn van_der_corput(mut n: usize, base: usize) -> f64 {
    let mut result = 0.0;
    let mut f = 1.0 / base as f64;
    while n > 0 {
        result += f * (n % base) as f64;
        n /= base;
        f /= base as f64;
    }
    result
}
