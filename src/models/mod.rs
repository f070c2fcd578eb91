//! Pricing engines: closed-form Black-Scholes-Merton, binomial lattice and
//! Monte Carlo simulation.
//!
//! Every engine consumes an [`OptionContract`](crate::contract::OptionContract)
//! and produces a [`PricingOutcome`]. The engines deliberately share no
//! trait: anything that needs "a pricer" (the finite-difference Greeks, the
//! implied-vol solver) takes a plain `Fn(&OptionContract) -> f64` instead,
//! which all three satisfy via a closure.

pub mod analytic;
pub mod lattice;
pub mod monte_carlo;

use serde::Serialize;

/// Result of a single pricing call.
#[derive(Debug, Clone, Serialize)]
pub struct PricingOutcome {
    pub price: f64,
    /// Monte Carlo standard error; 0 for deterministic methods.
    pub std_error: f64,
    pub elapsed_ms: f64,
    /// Human-readable method label, e.g. "Binomial-500".
    pub method: String,
    /// Simulation paths used; 0 for deterministic methods.
    pub paths: usize,
}

impl PricingOutcome {
    /// Outcome of a deterministic (non-simulation) method.
    pub(crate) fn deterministic(price: f64, elapsed_ms: f64, method: String) -> Self {
        Self {
            price,
            std_error: 0.0,
            elapsed_ms,
            method,
            paths: 0,
        }
    }
}
