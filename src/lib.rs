//! # Pricer-Lib: Option Pricing, Greeks and Implied-Vol Surface Calibration
//!
//! `pricer-lib` is a Rust library for quantitative analysts who want several
//! independent pricing methods for vanilla options, cross-checked against
//! each other, together with a parallel implied-volatility surface
//! calibrator.
//!
//! ## Core Features
//!
//! - **Analytic pricing**: closed-form Black-Scholes-Merton prices and
//!   first/second-order Greeks with continuous dividend yield
//! - **Binomial lattice**: CRR tree supporting European and American
//!   exercise with O(steps) memory
//! - **Monte Carlo**: terminal-value and multi-step GBM simulation with
//!   antithetic, stratified, quasi-random and control-variate variance
//!   reduction, parallelised with rayon
//! - **Finite-difference Greeks**: composable stencils over any injected
//!   pricing function, including charm and speed which have no closed form
//! - **Implied vol + surface calibration**: Newton-Raphson with bisection
//!   fallback, fanned out per quote across a worker pool
//!
//! ## Quick Start
//!
//! ```rust
//! use pricer_lib::models::monte_carlo::{self, McConfig};
//! use pricer_lib::models::analytic;
//! use pricer_lib::{OptionContract, OptionKind};
//!
//! let contract = OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionKind::Call);
//!
//! let closed_form = analytic::price(&contract)?;
//! let simulated = monte_carlo::price(&contract, &McConfig::default())?;
//!
//! // Two independent methods agree on the same contract.
//! assert!((closed_form.price - simulated.price).abs() < 0.5);
//! # Ok::<(), pricer_lib::PricerError>(())
//! ```
//!
//! ## Surface Calibration
//!
//! ```rust
//! use pricer_lib::{
//!     calibrate_surface, synthetic_smile, CalibrationConfig, FixedParameters, SmileParams,
//! };
//!
//! // Synthesise a quote grid from a parametric smile, then recover it.
//! let quotes = synthetic_smile(
//!     100.0,
//!     0.05,
//!     &[90.0, 100.0, 110.0],
//!     &[0.25, 1.0],
//!     &SmileParams::default(),
//! );
//! let summary = calibrate_surface(
//!     &quotes,
//!     100.0,
//!     FixedParameters { r: 0.05, q: 0.0 },
//!     &CalibrationConfig::production(),
//! )?;
//! assert_eq!(summary.surface.len(), quotes.len());
//! assert!(summary.rmse < 0.01);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Determinism
//!
//! All randomness is seed-driven; there is no global generator state. The
//! single-step Monte Carlo pricer and the surface calibrator are
//! reproducible for a fixed seed regardless of thread count. The multi-step
//! simulator derives per-worker streams from the base seed, so its results
//! additionally depend on the rayon pool size — see
//! [`models::monte_carlo::price_multistep`].

pub mod calibration;
pub mod contract;
pub mod error;
pub mod greeks;
pub mod math;
pub mod models;
pub mod random;

use anyhow::{Context, Result};

pub use calibration::{
    CalibrationConfig, CalibrationSummary, FixedParameters, MarketQuote, SmileParams, SolverConfig,
    SurfacePoint,
};
pub use contract::{ExerciseStyle, OptionContract, OptionKind};
pub use error::{PricerError, PricerResult};
pub use greeks::{BumpConfig, Greeks};
pub use models::monte_carlo::{McConfig, VarianceReduction};
pub use models::PricingOutcome;
pub use random::SampleScheme;

/// Pre-configured calibration settings for common use cases.
pub mod default_configs {
    use crate::calibration::CalibrationConfig;

    /// Full iteration budgets and tight tolerances for live systems.
    pub fn production() -> CalibrationConfig {
        CalibrationConfig::production()
    }

    /// Reduced budgets for development and quick validation runs.
    pub fn fast() -> CalibrationConfig {
        CalibrationConfig::fast()
    }
}

/// Calibrate an implied-volatility surface from market quotes.
///
/// Convenience wrapper over [`calibration::calibrate`]; see there for the
/// parallelism and error contract.
pub fn calibrate_surface(
    quotes: &[MarketQuote],
    spot: f64,
    fixed: FixedParameters,
    config: &CalibrationConfig,
) -> Result<CalibrationSummary> {
    calibration::calibrate(quotes, spot, fixed, config)
        .with_context(|| format!("surface calibration over {} quotes failed", quotes.len()))
}

/// Build a synthetic quote grid from a parametric smile; used for
/// round-trip fixtures and demos.
pub fn synthetic_smile(
    spot: f64,
    rate: f64,
    strikes: &[f64],
    expiries: &[f64],
    smile: &SmileParams,
) -> Vec<MarketQuote> {
    calibration::synthetic_smile_quotes(spot, rate, strikes, expiries, smile)
}
