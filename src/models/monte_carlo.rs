//! Monte Carlo pricer under risk-neutral geometric Brownian motion.
//!
//! The single-step pricer draws the whole normal sequence up front (seeded,
//! deterministic) and parallelises only the payoff evaluation, so its result
//! does not depend on the rayon pool size. The multi-step variant seeds one
//! stream per worker block instead; see [`price_multistep`] for the
//! reproducibility caveat that buys.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::contract::OptionContract;
use crate::error::{PricerError, PricerResult};
use crate::models::PricingOutcome;
use crate::random::{self, SampleScheme};

/// Variance-reduction strategy for the terminal-value simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceReduction {
    None,
    Antithetic,
    Stratified,
    QuasiRandom,
    /// Terminal asset price as a regression control.
    ControlVariate,
}

impl VarianceReduction {
    fn sample_scheme(self) -> SampleScheme {
        match self {
            VarianceReduction::Antithetic => SampleScheme::Antithetic,
            VarianceReduction::Stratified => SampleScheme::Stratified,
            VarianceReduction::QuasiRandom => SampleScheme::QuasiRandom,
            VarianceReduction::None | VarianceReduction::ControlVariate => SampleScheme::Pseudo,
        }
    }

    fn label(self) -> &'static str {
        match self {
            VarianceReduction::None => "Monte Carlo",
            VarianceReduction::Antithetic => "Monte Carlo (Antithetic)",
            VarianceReduction::Stratified => "Monte Carlo (Stratified)",
            VarianceReduction::QuasiRandom => "Monte Carlo (Quasi-Random)",
            VarianceReduction::ControlVariate => "Monte Carlo (Control Variate)",
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct McConfig {
    #[serde(default = "default_paths")]
    pub paths: usize,
    #[serde(default = "default_scheme")]
    pub scheme: VarianceReduction,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for McConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            scheme: default_scheme(),
            seed: default_seed(),
        }
    }
}

fn default_paths() -> usize {
    10_000
}

fn default_scheme() -> VarianceReduction {
    VarianceReduction::Antithetic
}

fn default_seed() -> u64 {
    42
}

/// Terminal-value Monte Carlo price of a European contract.
///
/// S_T = S·exp((r − q − σ²/2)·T + σ·√T·z); the price is the discounted
/// sample mean of the payoffs (floored at zero) and the standard error the
/// discounted sample standard deviation over √N.
pub fn price(c: &OptionContract, config: &McConfig) -> PricerResult<PricingOutcome> {
    c.validate()?;
    if config.paths < 2 {
        return Err(PricerError::invalid_parameter(
            "at least 2 simulation paths are required",
        ));
    }

    let start = Instant::now();
    let n = config.paths;
    let drift = (c.rate - c.dividend - 0.5 * c.sigma * c.sigma) * c.expiry;
    let vol_sqrt_t = c.sigma * c.expiry.sqrt();
    let df = (-c.rate * c.expiry).exp();

    let z = random::draws(config.scheme.sample_scheme(), n, config.seed);

    let (price_est, std_err) = if config.scheme == VarianceReduction::ControlVariate {
        // Payoff and its control (the terminal price itself) from the same
        // draws; each worker fills disjoint slots of the output vectors.
        let terminals: Vec<f64> = z
            .par_iter()
            .map(|&zi| c.spot * (drift + vol_sqrt_t * zi).exp())
            .collect();
        let payoffs: Vec<f64> = terminals
            .par_iter()
            .map(|&st| c.kind.intrinsic(st, c.strike))
            .collect();

        let forward = c.spot * ((c.rate - c.dividend) * c.expiry).exp();
        let mean_terminal = terminals.iter().sum::<f64>() / n as f64;
        let mean_payoff = payoffs.iter().sum::<f64>() / n as f64;

        let mut cov = 0.0;
        let mut var_control = 0.0;
        for (&t, &p) in terminals.iter().zip(&payoffs) {
            let dc = t - mean_terminal;
            cov += dc * (p - mean_payoff);
            var_control += dc * dc;
        }
        let beta = if var_control > 0.0 { cov / var_control } else { 0.0 };

        let adjusted: Vec<f64> = payoffs
            .iter()
            .zip(&terminals)
            .map(|(&p, &t)| p - beta * (t - forward))
            .collect();
        discounted_mean_and_error(&adjusted, df)
    } else {
        let payoffs: Vec<f64> = z
            .par_iter()
            .map(|&zi| {
                let terminal = c.spot * (drift + vol_sqrt_t * zi).exp();
                c.kind.intrinsic(terminal, c.strike)
            })
            .collect();
        discounted_mean_and_error(&payoffs, df)
    };

    Ok(PricingOutcome {
        price: price_est.max(0.0),
        std_error: std_err,
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
        method: config.scheme.label().to_string(),
        paths: n,
    })
}

/// Stride between per-worker seeds in the multi-step simulation.
const WORKER_SEED_STRIDE: u64 = 1000;

/// Multi-step path simulation: each path walks `num_steps` sub-periods, the
/// hook for path-dependent extensions.
///
/// The path set is partitioned into one block per rayon worker and each
/// block draws from its own stream seeded with
/// `seed + block_index * 1000`. A fixed seed therefore reproduces results
/// only for a fixed thread count — a documented property of this method,
/// not an error.
pub fn price_multistep(
    c: &OptionContract,
    paths: usize,
    num_steps: usize,
    seed: u64,
) -> PricerResult<PricingOutcome> {
    c.validate()?;
    if paths < 2 {
        return Err(PricerError::invalid_parameter(
            "at least 2 simulation paths are required",
        ));
    }
    if num_steps == 0 {
        return Err(PricerError::invalid_parameter("num_steps must be positive"));
    }

    let start = Instant::now();
    let dt = c.expiry / num_steps as f64;
    let drift = (c.rate - c.dividend - 0.5 * c.sigma * c.sigma) * dt;
    let vol_sqrt_dt = c.sigma * dt.sqrt();
    let df = (-c.rate * c.expiry).exp();

    let workers = rayon::current_num_threads().max(1);
    let block = paths.div_ceil(workers);

    let mut payoffs = vec![0.0; paths];
    payoffs
        .par_chunks_mut(block)
        .enumerate()
        .for_each(|(block_idx, out)| {
            let mut rng = StdRng::seed_from_u64(seed + block_idx as u64 * WORKER_SEED_STRIDE);
            for slot in out.iter_mut() {
                let mut spot = c.spot;
                for _ in 0..num_steps {
                    let z: f64 = rng.sample(StandardNormal);
                    spot *= (drift + vol_sqrt_dt * z).exp();
                }
                *slot = c.kind.intrinsic(spot, c.strike);
            }
        });

    let (price_est, std_err) = discounted_mean_and_error(&payoffs, df);

    Ok(PricingOutcome {
        price: price_est.max(0.0),
        std_error: std_err,
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
        method: format!("MC MultiStep ({} steps)", num_steps),
        paths,
    })
}

/// Serial reduction run after the parallel compute phase: discounted sample
/// mean and its standard error (sample variance with n−1).
fn discounted_mean_and_error(samples: &[f64], df: f64) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / (n - 1.0);
    (df * mean, df * (var / n).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::OptionKind;

    fn atm() -> OptionContract {
        OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionKind::Call)
    }

    #[test]
    fn same_seed_reproduces_single_step_price() {
        let config = McConfig {
            paths: 5_000,
            ..McConfig::default()
        };
        let a = price(&atm(), &config).unwrap();
        let b = price(&atm(), &config).unwrap();
        assert_eq!(a.price, b.price);
        assert_eq!(a.std_error, b.std_error);
    }

    #[test]
    fn outcome_carries_method_and_path_count() {
        let config = McConfig {
            paths: 2_000,
            scheme: VarianceReduction::ControlVariate,
            seed: 7,
        };
        let out = price(&atm(), &config).unwrap();
        assert_eq!(out.method, "Monte Carlo (Control Variate)");
        assert_eq!(out.paths, 2_000);
        assert!(out.std_error > 0.0);
    }

    #[test]
    fn rejects_degenerate_path_counts() {
        let config = McConfig {
            paths: 1,
            ..McConfig::default()
        };
        assert!(price(&atm(), &config).is_err());
        assert!(price_multistep(&atm(), 1_000, 0, 42).is_err());
    }
}
