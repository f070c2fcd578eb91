//! Implied-volatility root finder: Newton-Raphson with a bisection fallback.

use std::f64::consts::PI;

use tracing::debug;

use crate::calibration::config::SolverConfig;
use crate::contract::{OptionContract, OptionKind};
use crate::error::{PricerError, PricerResult};
use crate::models::analytic;

/// Newton steps become unstable below this vega magnitude.
const VEGA_FLOOR: f64 = 1e-12;

/// Hard bounds on any volatility estimate this solver returns.
const SIGMA_MIN: f64 = 0.001;
const SIGMA_MAX: f64 = 10.0;

/// Bisection bracket.
const BRACKET_LO: f64 = 0.001;
const BRACKET_HI: f64 = 5.0;

/// Invert a market price to the Black-Scholes implied volatility.
///
/// Starts from the Brenner-Subrahmanyam approximation
/// σ₀ = √(2π/T)·price/S (clamped to [0.01, 5.0]) and runs Newton-Raphson
/// within the configured budget, clamping each iterate to [0.001, 10.0] and
/// abandoning the Newton branch early if vega collapses. If Newton does not
/// converge, bisection restarts from the full [0.001, 5.0] bracket — not
/// from the stale Newton iterate — and the bracket midpoint is returned
/// after the budget is spent.
///
/// For structurally valid inputs this always returns a finite estimate in
/// a bounded number of iterations; non-convergence is never an error.
pub fn solve(
    market_price: f64,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    dividend: f64,
    kind: OptionKind,
    config: &SolverConfig,
) -> PricerResult<f64> {
    if !(market_price > 0.0) || !market_price.is_finite() {
        return Err(PricerError::invalid_parameter(format!(
            "market price must be positive, got {}",
            market_price
        )));
    }
    // Positivity of spot/strike/expiry is checked through the contract.
    let probe = OptionContract::european(spot, strike, expiry, rate, 0.5, dividend, kind);
    probe.validate()?;

    let mut sigma = ((2.0 * PI / expiry).sqrt() * market_price / spot).clamp(0.01, 5.0);

    for _ in 0..config.newton_max_iter {
        let c = OptionContract::european(spot, strike, expiry, rate, sigma, dividend, kind);
        let diff = analytic::price_value(&c) - market_price;
        if diff.abs() < config.newton_tolerance {
            return Ok(sigma);
        }

        // Per-unit vega; the analytic helper reports per 1%.
        let vega = analytic::vega(&c) * 100.0;
        if vega.abs() < VEGA_FLOOR {
            debug!(sigma, vega, "vega collapsed, abandoning Newton branch");
            break;
        }

        sigma = (sigma - diff / vega).clamp(SIGMA_MIN, SIGMA_MAX);
    }

    debug!(
        strike,
        expiry, "Newton budget exhausted, restarting with bisection"
    );
    Ok(bisection(
        market_price,
        spot,
        strike,
        expiry,
        rate,
        dividend,
        kind,
        config,
    ))
}

/// Bisection on the full bracket; always returns the midpoint estimate.
#[allow(clippy::too_many_arguments)]
fn bisection(
    market_price: f64,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    dividend: f64,
    kind: OptionKind,
    config: &SolverConfig,
) -> f64 {
    let mut lo = BRACKET_LO;
    let mut hi = BRACKET_HI;

    for _ in 0..config.bisection_max_iter {
        let mid = 0.5 * (lo + hi);
        let c = OptionContract::european(spot, strike, expiry, rate, mid, dividend, kind);
        let model = analytic::price_value(&c);

        if (model - market_price).abs() < config.bisection_tolerance {
            return mid;
        }
        // Price is monotone in vol, so the bracket halves each round.
        if model > market_price {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    0.5 * (lo + hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovered_vol_stays_inside_hard_bounds() {
        let config = SolverConfig::default();
        // A price far above anything the bracket can reach still yields a
        // finite, bounded estimate.
        let iv = solve(99.0, 100.0, 100.0, 0.1, 0.0, 0.0, OptionKind::Call, &config).unwrap();
        assert!((SIGMA_MIN..=SIGMA_MAX).contains(&iv));
    }

    #[test]
    fn rejects_nonpositive_price() {
        let config = SolverConfig::default();
        assert!(solve(0.0, 100.0, 100.0, 1.0, 0.05, 0.0, OptionKind::Call, &config).is_err());
        assert!(solve(-1.0, 100.0, 100.0, 1.0, 0.05, 0.0, OptionKind::Put, &config).is_err());
    }

    #[test]
    fn rejects_nonpositive_contract_inputs() {
        let config = SolverConfig::default();
        assert!(solve(5.0, -100.0, 100.0, 1.0, 0.05, 0.0, OptionKind::Call, &config).is_err());
        assert!(solve(5.0, 100.0, 100.0, 0.0, 0.05, 0.0, OptionKind::Call, &config).is_err());
    }
}
