//! Option contract definitions.

use serde::{Deserialize, Serialize};

use crate::error::{PricerError, PricerResult};

/// Option kind (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Intrinsic value at the given spot.
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        }
    }
}

/// Exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseStyle {
    European,
    American,
}

/// A vanilla option contract together with the market state it is priced
/// under. Plain value type, built once per pricing request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionContract {
    /// Spot price of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Volatility (annualised).
    pub sigma: f64,
    /// Continuous dividend yield.
    pub dividend: f64,
    pub kind: OptionKind,
    pub style: ExerciseStyle,
}

impl OptionContract {
    pub fn european(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        sigma: f64,
        dividend: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            expiry,
            rate,
            sigma,
            dividend,
            kind,
            style: ExerciseStyle::European,
        }
    }

    pub fn american(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        sigma: f64,
        dividend: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            style: ExerciseStyle::American,
            ..Self::european(spot, strike, expiry, rate, sigma, dividend, kind)
        }
    }

    /// Every pricer requires strictly positive spot, strike, expiry and
    /// volatility. Violations are rejected before any computation so a bad
    /// input cannot leak NaNs into a calibration sweep.
    pub fn validate(&self) -> PricerResult<()> {
        if !(self.spot > 0.0) || !self.spot.is_finite() {
            return Err(PricerError::invalid_parameter(format!(
                "spot must be positive, got {}",
                self.spot
            )));
        }
        if !(self.strike > 0.0) || !self.strike.is_finite() {
            return Err(PricerError::invalid_parameter(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if !(self.expiry > 0.0) || !self.expiry.is_finite() {
            return Err(PricerError::invalid_parameter(format!(
                "expiry must be positive, got {}",
                self.expiry
            )));
        }
        if !(self.sigma > 0.0) || !self.sigma.is_finite() {
            return Err(PricerError::invalid_parameter(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        if !self.rate.is_finite() || !self.dividend.is_finite() {
            return Err(PricerError::invalid_parameter(
                "rate and dividend yield must be finite",
            ));
        }
        Ok(())
    }

    /// Intrinsic value at the contract's current spot.
    pub fn intrinsic(&self) -> f64 {
        self.kind.intrinsic(self.spot, self.strike)
    }

    /// Simple moneyness S/K.
    pub fn moneyness(&self) -> f64 {
        self.spot / self.strike
    }

    /// Log-moneyness ln(K/S).
    pub fn log_moneyness(&self) -> f64 {
        (self.strike / self.spot).ln()
    }
}
