//! Option sensitivities and the finite-difference engine that computes them
//! over any pricing function.
//!
//! The engine exists for two reasons: cross-validating the closed-form
//! Greeks of the analytic pricer, and producing charm and speed, which have
//! no closed form here. It is built from four small stencil primitives
//! (central, second, third, cross difference) parameterised by a
//! perturbation closure and a step size, so each Greek is one line of
//! wiring rather than repeated arithmetic.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::contract::OptionContract;
use crate::error::PricerResult;
use crate::models::analytic;

/// Full sensitivity bundle for one contract.
#[derive(Debug, Clone, Serialize)]
pub struct Greeks {
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// Time decay per calendar day.
    pub theta: f64,
    /// dV/dσ per 1% vol move.
    pub vega: f64,
    /// dV/dr per 1% rate move.
    pub rho: f64,
    /// d²V/(dS dσ).
    pub vanna: f64,
    /// d²V/dσ² (vomma).
    pub volga: f64,
    /// d²V/(dS dT) — delta decay.
    pub charm: f64,
    /// d³V/dS³.
    pub speed: f64,
    pub elapsed_ms: f64,
    pub method: String,
}

/// Finite-difference bump sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BumpConfig {
    /// Spot bump as a fraction of spot.
    #[serde(default = "default_spot_rel")]
    pub spot_rel: f64,
    /// Absolute volatility bump.
    #[serde(default = "default_vol_abs")]
    pub vol_abs: f64,
    /// Absolute rate bump.
    #[serde(default = "default_rate_abs")]
    pub rate_abs: f64,
    /// Time bump in years.
    #[serde(default = "default_time_abs")]
    pub time_abs: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            spot_rel: default_spot_rel(),
            vol_abs: default_vol_abs(),
            rate_abs: default_rate_abs(),
            time_abs: default_time_abs(),
        }
    }
}

fn default_spot_rel() -> f64 {
    0.01
}

fn default_vol_abs() -> f64 {
    0.01
}

fn default_rate_abs() -> f64 {
    0.01
}

fn default_time_abs() -> f64 {
    1.0 / 365.0
}

// Perturbation directions. Each stencil takes one (or two) of these plus a
// step size, which is what lets every Greek share the same four primitives.

fn bump_spot(c: &mut OptionContract, h: f64) {
    c.spot += h;
}

fn bump_sigma(c: &mut OptionContract, h: f64) {
    c.sigma += h;
}

fn bump_rate(c: &mut OptionContract, h: f64) {
    c.rate += h;
}

fn bump_expiry(c: &mut OptionContract, h: f64) {
    c.expiry += h;
}

fn central_diff<F, P>(c: &OptionContract, pricer: &F, perturb: P, h: f64) -> f64
where
    F: Fn(&OptionContract) -> f64,
    P: Fn(&mut OptionContract, f64),
{
    let mut up = *c;
    let mut down = *c;
    perturb(&mut up, h);
    perturb(&mut down, -h);
    (pricer(&up) - pricer(&down)) / (2.0 * h)
}

fn second_diff<F, P>(c: &OptionContract, pricer: &F, perturb: P, h: f64) -> f64
where
    F: Fn(&OptionContract) -> f64,
    P: Fn(&mut OptionContract, f64),
{
    let mut up = *c;
    let mut down = *c;
    perturb(&mut up, h);
    perturb(&mut down, -h);
    (pricer(&up) - 2.0 * pricer(c) + pricer(&down)) / (h * h)
}

fn third_diff<F, P>(c: &OptionContract, pricer: &F, perturb: P, h: f64) -> f64
where
    F: Fn(&OptionContract) -> f64,
    P: Fn(&mut OptionContract, f64),
{
    let mut p1 = *c;
    let mut p2 = *c;
    let mut m1 = *c;
    let mut m2 = *c;
    perturb(&mut p1, h);
    perturb(&mut p2, 2.0 * h);
    perturb(&mut m1, -h);
    perturb(&mut m2, -2.0 * h);
    (pricer(&p2) - 2.0 * pricer(&p1) + 2.0 * pricer(&m1) - pricer(&m2)) / (2.0 * h * h * h)
}

fn cross_diff<F, P1, P2>(
    c: &OptionContract,
    pricer: &F,
    perturb1: P1,
    perturb2: P2,
    h1: f64,
    h2: f64,
) -> f64
where
    F: Fn(&OptionContract) -> f64,
    P1: Fn(&mut OptionContract, f64),
    P2: Fn(&mut OptionContract, f64),
{
    let mut pp = *c;
    let mut pm = *c;
    let mut mp = *c;
    let mut mm = *c;
    perturb1(&mut pp, h1);
    perturb2(&mut pp, h2);
    perturb1(&mut pm, h1);
    perturb2(&mut pm, -h2);
    perturb1(&mut mp, -h1);
    perturb2(&mut mp, h2);
    perturb1(&mut mm, -h1);
    perturb2(&mut mm, -h2);
    (pricer(&pp) - pricer(&pm) - pricer(&mp) + pricer(&mm)) / (4.0 * h1 * h2)
}

/// Compute the full bundle via finite differences over an injected pricing
/// function. Any pricer works: the analytic closed form, a binomial-tree
/// closure, a fixed-seed Monte Carlo closure.
pub fn finite_difference<F>(
    c: &OptionContract,
    pricer: F,
    bumps: &BumpConfig,
) -> PricerResult<Greeks>
where
    F: Fn(&OptionContract) -> f64,
{
    c.validate()?;
    let start = Instant::now();

    let ds = c.spot * bumps.spot_rel;
    let dsig = bumps.vol_abs;
    let dr = bumps.rate_abs;
    let dt = bumps.time_abs;

    let g = Greeks {
        delta: central_diff(c, &pricer, bump_spot, ds),
        gamma: second_diff(c, &pricer, bump_spot, ds),
        // Decay as the expiry clock runs forward, per calendar day.
        theta: -central_diff(c, &pricer, bump_expiry, dt) / 365.0,
        vega: central_diff(c, &pricer, bump_sigma, dsig) / 100.0,
        rho: central_diff(c, &pricer, bump_rate, dr) / 100.0,
        vanna: cross_diff(c, &pricer, bump_spot, bump_sigma, ds, dsig),
        volga: second_diff(c, &pricer, bump_sigma, dsig),
        charm: cross_diff(c, &pricer, bump_spot, bump_expiry, ds, dt),
        speed: third_diff(c, &pricer, bump_spot, ds),
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
        method: "Finite Difference".to_string(),
    };
    Ok(g)
}

/// Finite-difference bundle over the analytic pricer with default bumps —
/// the standard cross-validation path.
pub fn finite_difference_default(c: &OptionContract) -> PricerResult<Greeks> {
    finite_difference(c, analytic::price_value, &BumpConfig::default())
}
