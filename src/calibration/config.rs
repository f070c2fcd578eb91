//! Solver and calibration configuration.

use anyhow::Context;
use serde::Deserialize;

/// Implied-volatility solver settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SolverConfig {
    /// Newton-Raphson iteration budget.
    #[serde(default = "default_newton_max_iter")]
    pub newton_max_iter: usize,

    /// Price tolerance for Newton convergence.
    #[serde(default = "default_newton_tolerance")]
    pub newton_tolerance: f64,

    /// Bisection fallback iteration budget.
    #[serde(default = "default_bisection_max_iter")]
    pub bisection_max_iter: usize,

    /// Price tolerance for the bisection fallback.
    #[serde(default = "default_bisection_tolerance")]
    pub bisection_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            newton_max_iter: default_newton_max_iter(),
            newton_tolerance: default_newton_tolerance(),
            bisection_max_iter: default_bisection_max_iter(),
            bisection_tolerance: default_bisection_tolerance(),
        }
    }
}

fn default_newton_max_iter() -> usize {
    100
}

fn default_newton_tolerance() -> f64 {
    1e-8
}

fn default_bisection_max_iter() -> usize {
    200
}

fn default_bisection_tolerance() -> f64 {
    1e-6
}

/// Main configuration for surface calibration.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct CalibrationConfig {
    #[serde(default)]
    pub solver: SolverConfig,
}

impl CalibrationConfig {
    /// Production-grade settings: full iteration budgets, tight tolerances.
    pub fn production() -> Self {
        Self {
            solver: SolverConfig {
                newton_max_iter: 100,
                newton_tolerance: 1e-8,
                bisection_max_iter: 200,
                bisection_tolerance: 1e-6,
            },
        }
    }

    /// Reduced budgets for development and quick validation runs.
    pub fn fast() -> Self {
        Self {
            solver: SolverConfig {
                newton_max_iter: 50,
                newton_tolerance: 1e-6,
                bisection_max_iter: 100,
                bisection_tolerance: 1e-4,
            },
        }
    }

    /// Load a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("failed to parse calibration config")
    }
}
