//! Error types for pricer-lib.
//!
//! Only structurally invalid inputs and infeasible discretizations are
//! surfaced as errors. Non-convergence of the iterative solvers is handled
//! internally with a best-effort estimate and never raised.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricerError {
    /// A pricing input violated strict positivity (spot, strike, expiry,
    /// volatility) or was otherwise malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The binomial risk-neutral probability fell outside (0, 1); the chosen
    /// step count is infeasible for the given rate/volatility combination.
    #[error("unstable discretization: {0}")]
    UnstableDiscretization(String),
}

pub type PricerResult<T> = Result<T, PricerError>;

impl PricerError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn unstable_discretization(msg: impl Into<String>) -> Self {
        Self::UnstableDiscretization(msg.into())
    }
}
