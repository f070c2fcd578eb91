//! Recombining binomial (Cox-Ross-Rubinstein) lattice pricer.
//!
//! Supports European and American exercise. Backward induction reuses a
//! single node array, so memory is O(steps) while time is O(steps²).

use std::time::Instant;

use crate::contract::{ExerciseStyle, OptionContract};
use crate::error::{PricerError, PricerResult};
use crate::models::PricingOutcome;

/// Price a contract on a CRR tree with the given number of time steps.
///
/// The risk-neutral up-probability must land strictly inside (0, 1);
/// anything else means the chosen step count cannot resolve the given
/// rate/volatility combination, which is reported as
/// [`PricerError::UnstableDiscretization`] rather than clamped.
pub fn price(c: &OptionContract, steps: usize) -> PricerResult<PricingOutcome> {
    c.validate()?;
    if steps == 0 {
        return Err(PricerError::invalid_parameter("steps must be positive"));
    }

    let start = Instant::now();

    let dt = c.expiry / steps as f64;
    let up = (c.sigma * dt.sqrt()).exp();
    let down = 1.0 / up;
    let df = (-c.rate * dt).exp();
    let prob = (((c.rate - c.dividend) * dt).exp() - down) / (up - down);

    if !(prob > 0.0 && prob < 1.0) {
        return Err(PricerError::unstable_discretization(format!(
            "risk-neutral probability {:.6} outside (0, 1) for {} steps; \
             increase the step count",
            prob, steps
        )));
    }

    // Terminal payoffs at the steps+1 leaves; node i has had i down-moves.
    let mut values: Vec<f64> = (0..=steps)
        .map(|i| {
            let spot = c.spot * up.powi((steps - i) as i32) * down.powi(i as i32);
            c.kind.intrinsic(spot, c.strike)
        })
        .collect();

    for step in (0..steps).rev() {
        for i in 0..=step {
            let continuation = df * (prob * values[i] + (1.0 - prob) * values[i + 1]);
            values[i] = match c.style {
                ExerciseStyle::European => continuation,
                ExerciseStyle::American => {
                    let spot = c.spot * up.powi((step - i) as i32) * down.powi(i as i32);
                    continuation.max(c.kind.intrinsic(spot, c.strike))
                }
            };
        }
    }

    Ok(PricingOutcome::deterministic(
        values[0],
        start.elapsed().as_secs_f64() * 1e3,
        format!("Binomial-{}", steps),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::OptionKind;
    use crate::models::analytic;

    #[test]
    fn european_converges_to_black_scholes() {
        let c = OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionKind::Call);
        let bs = analytic::price_value(&c);
        let tree = price(&c, 1000).unwrap().price;
        assert!((tree - bs).abs() / bs < 1e-3, "tree={} bs={}", tree, bs);
    }

    #[test]
    fn american_put_carries_early_exercise_premium() {
        let eur = OptionContract::european(100.0, 110.0, 1.0, 0.08, 0.25, 0.0, OptionKind::Put);
        let amer = OptionContract::american(100.0, 110.0, 1.0, 0.08, 0.25, 0.0, OptionKind::Put);
        let pe = price(&eur, 500).unwrap().price;
        let pa = price(&amer, 500).unwrap().price;
        assert!(pa >= pe, "american {} < european {}", pa, pe);
        // Deep ITM put with a high rate: premium should be strictly positive.
        assert!(pa - pe > 1e-3, "premium: {}", pa - pe);
    }

    #[test]
    fn infeasible_discretization_is_reported() {
        // One giant step with a strongly negative drift pushes the
        // up-probability below zero.
        let c = OptionContract::european(100.0, 100.0, 1.0, -1.0, 0.5, 0.0, OptionKind::Call);
        let err = price(&c, 1).unwrap_err();
        assert!(matches!(err, PricerError::UnstableDiscretization(_)));
    }
}
