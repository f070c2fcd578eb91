//! Data types flowing through the surface calibration pipeline.

use serde::{Deserialize, Serialize};

use crate::contract::OptionKind;

/// A single observed market quote, externally supplied or synthesised.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketQuote {
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    pub market_price: f64,
    pub kind: OptionKind,
}

/// One calibrated point of the surface; produced per input quote.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SurfacePoint {
    pub strike: f64,
    pub expiry: f64,
    pub implied_vol: f64,
    pub market_price: f64,
    /// Analytic re-price at the recovered implied vol.
    pub model_price: f64,
    /// |model − market|.
    pub error: f64,
}

/// Aggregate calibration report. `surface` holds exactly one entry per
/// input quote, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationSummary {
    pub surface: Vec<SurfacePoint>,
    pub rmse: f64,
    pub max_error: f64,
    pub elapsed_ms: f64,
    pub quotes: usize,
}

/// Market parameters that are not calibrated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixedParameters {
    /// Risk-free rate.
    pub r: f64,
    /// Continuous dividend yield.
    pub q: f64,
}

impl Default for FixedParameters {
    fn default() -> Self {
        Self { r: 0.02, q: 0.0 }
    }
}

/// Parametric smile used by the synthetic quote generator:
/// vol(K, T) = base + skew·m·√(0.5/T) + smile·m² with m = ln(K/spot).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmileParams {
    pub base_vol: f64,
    /// Vol skew per unit log-moneyness.
    pub skew: f64,
    /// Smile curvature.
    pub smile: f64,
}

impl Default for SmileParams {
    fn default() -> Self {
        Self {
            base_vol: 0.20,
            skew: -0.10,
            smile: 0.05,
        }
    }
}
