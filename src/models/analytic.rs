//! Closed-form Black-Scholes-Merton pricer with continuous dividend yield.
//!
//! Prices and first/second-order Greeks are exact; charm and speed have no
//! closed form in this parameterisation and come from the finite-difference
//! engine in [`crate::greeks`] instead.

use std::time::Instant;

use crate::contract::{OptionContract, OptionKind};
use crate::error::PricerResult;
use crate::greeks::Greeks;
use crate::math::{norm_cdf, norm_pdf};
use crate::models::PricingOutcome;

pub fn d1(c: &OptionContract) -> f64 {
    ((c.spot / c.strike).ln() + (c.rate - c.dividend + 0.5 * c.sigma * c.sigma) * c.expiry)
        / (c.sigma * c.expiry.sqrt())
}

pub fn d2(c: &OptionContract) -> f64 {
    d1(c) - c.sigma * c.expiry.sqrt()
}

/// Black-Scholes-Merton value of a European contract.
///
/// Assumes a validated contract; the hot loops in the Greeks engine and the
/// implied-vol solver call this directly after validating once up front.
pub fn price_value(c: &OptionContract) -> f64 {
    let d1 = d1(c);
    let d2 = d1 - c.sigma * c.expiry.sqrt();
    let df = (-c.rate * c.expiry).exp();
    let fwd_factor = (-c.dividend * c.expiry).exp();

    match c.kind {
        OptionKind::Call => c.spot * fwd_factor * norm_cdf(d1) - c.strike * df * norm_cdf(d2),
        OptionKind::Put => c.strike * df * norm_cdf(-d2) - c.spot * fwd_factor * norm_cdf(-d1),
    }
}

/// Price a contract, rejecting invalid inputs before computation.
pub fn price(c: &OptionContract) -> PricerResult<PricingOutcome> {
    c.validate()?;
    let start = Instant::now();
    let value = price_value(c);
    Ok(PricingOutcome::deterministic(
        value,
        start.elapsed().as_secs_f64() * 1e3,
        "Black-Scholes".to_string(),
    ))
}

/// dV/dS.
pub fn delta(c: &OptionContract) -> f64 {
    let fwd_factor = (-c.dividend * c.expiry).exp();
    match c.kind {
        OptionKind::Call => fwd_factor * norm_cdf(d1(c)),
        OptionKind::Put => fwd_factor * (norm_cdf(d1(c)) - 1.0),
    }
}

/// d²V/dS², identical for calls and puts.
pub fn gamma(c: &OptionContract) -> f64 {
    let fwd_factor = (-c.dividend * c.expiry).exp();
    fwd_factor * norm_pdf(d1(c)) / (c.spot * c.sigma * c.expiry.sqrt())
}

/// Time decay per calendar day.
pub fn theta(c: &OptionContract) -> f64 {
    let d1 = d1(c);
    let d2 = d1 - c.sigma * c.expiry.sqrt();
    let fwd_factor = (-c.dividend * c.expiry).exp();
    let df = (-c.rate * c.expiry).exp();
    let term1 = -(c.spot * fwd_factor * norm_pdf(d1) * c.sigma) / (2.0 * c.expiry.sqrt());

    let per_year = match c.kind {
        OptionKind::Call => {
            term1 + c.dividend * c.spot * fwd_factor * norm_cdf(d1)
                - c.rate * c.strike * df * norm_cdf(d2)
        }
        OptionKind::Put => {
            term1 - c.dividend * c.spot * fwd_factor * norm_cdf(-d1)
                + c.rate * c.strike * df * norm_cdf(-d2)
        }
    };
    per_year / 365.0
}

/// dV/dσ per 1% vol move, identical for calls and puts.
pub fn vega(c: &OptionContract) -> f64 {
    let fwd_factor = (-c.dividend * c.expiry).exp();
    c.spot * fwd_factor * norm_pdf(d1(c)) * c.expiry.sqrt() / 100.0
}

/// dV/dr per 1% rate move.
pub fn rho(c: &OptionContract) -> f64 {
    let d2 = d2(c);
    let df = (-c.rate * c.expiry).exp();
    match c.kind {
        OptionKind::Call => c.strike * c.expiry * df * norm_cdf(d2) / 100.0,
        OptionKind::Put => -c.strike * c.expiry * df * norm_cdf(-d2) / 100.0,
    }
}

/// d²V/(dS dσ).
pub fn vanna(c: &OptionContract) -> f64 {
    let d1 = d1(c);
    let d2 = d1 - c.sigma * c.expiry.sqrt();
    let fwd_factor = (-c.dividend * c.expiry).exp();
    -fwd_factor * norm_pdf(d1) * d2 / c.sigma
}

/// d²V/dσ² (vomma).
pub fn volga(c: &OptionContract) -> f64 {
    let d1 = d1(c);
    let d2 = d1 - c.sigma * c.expiry.sqrt();
    let fwd_factor = (-c.dividend * c.expiry).exp();
    c.spot * fwd_factor * norm_pdf(d1) * c.expiry.sqrt() * d1 * d2 / c.sigma
}

/// Full closed-form Greeks bundle.
///
/// Charm and speed are left at zero; they are only available through the
/// finite-difference engine.
pub fn greeks(c: &OptionContract) -> PricerResult<Greeks> {
    c.validate()?;
    let start = Instant::now();
    let g = Greeks {
        delta: delta(c),
        gamma: gamma(c),
        theta: theta(c),
        vega: vega(c),
        rho: rho(c),
        vanna: vanna(c),
        volga: volga(c),
        charm: 0.0,
        speed: 0.0,
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
        method: "BS-Analytical".to_string(),
    };
    Ok(g)
}
