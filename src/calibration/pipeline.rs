//! Surface calibration: per-quote implied vol recovery across a worker
//! pool, plus the synthetic smile generator used to build test fixtures.

use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use crate::calibration::config::CalibrationConfig;
use crate::calibration::implied_vol;
use crate::calibration::types::{
    CalibrationSummary, FixedParameters, MarketQuote, SmileParams, SurfacePoint,
};
use crate::contract::{OptionContract, OptionKind};
use crate::error::{PricerError, PricerResult};
use crate::models::analytic;

/// Synthetic vols are floored here, matching the generator's smile formula.
const SMILE_VOL_FLOOR: f64 = 0.05;

/// Calibrate an implied-volatility surface from a grid of market quotes.
///
/// Each quote is independent: recover its implied vol, re-price with the
/// analytic pricer at that vol, record the absolute error. The per-quote
/// work fans out over the rayon pool (each worker fills its own output
/// slot; quote order is preserved), and a serial reduction afterwards
/// aggregates RMSE and max error.
///
/// Structurally invalid quotes fail the whole calibration up front rather
/// than leaking NaNs into the sweep.
pub fn calibrate(
    quotes: &[MarketQuote],
    spot: f64,
    fixed: FixedParameters,
    config: &CalibrationConfig,
) -> PricerResult<CalibrationSummary> {
    let start = Instant::now();

    if !(spot > 0.0) || !spot.is_finite() {
        return Err(PricerError::invalid_parameter(format!(
            "spot must be positive, got {}",
            spot
        )));
    }
    for (i, q) in quotes.iter().enumerate() {
        if !(q.strike > 0.0 && q.expiry > 0.0 && q.market_price > 0.0) {
            return Err(PricerError::invalid_parameter(format!(
                "quote {}: strike/expiry/price must all be positive \
                 (strike={}, expiry={}, price={})",
                i, q.strike, q.expiry, q.market_price
            )));
        }
    }

    let surface: Vec<SurfacePoint> = quotes
        .par_iter()
        .map(|q| {
            let iv = implied_vol::solve(
                q.market_price,
                spot,
                q.strike,
                q.expiry,
                fixed.r,
                fixed.q,
                q.kind,
                &config.solver,
            )?;
            let c = OptionContract::european(spot, q.strike, q.expiry, fixed.r, iv, fixed.q, q.kind);
            let model_price = analytic::price_value(&c);
            Ok(SurfacePoint {
                strike: q.strike,
                expiry: q.expiry,
                implied_vol: iv,
                market_price: q.market_price,
                model_price,
                error: (model_price - q.market_price).abs(),
            })
        })
        .collect::<PricerResult<Vec<_>>>()?;

    let sse: f64 = surface.iter().map(|p| p.error * p.error).sum();
    let max_error = surface.iter().fold(0.0_f64, |m, p| m.max(p.error));
    let rmse = if surface.is_empty() {
        0.0
    } else {
        (sse / surface.len() as f64).sqrt()
    };

    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    info!(
        quotes = quotes.len(),
        rmse, max_error, elapsed_ms, "surface calibration finished"
    );

    Ok(CalibrationSummary {
        quotes: surface.len(),
        surface,
        rmse,
        max_error,
        elapsed_ms,
    })
}

/// Build a synthetic quote grid from a parametric smile:
/// vol(K, T) = base + skew·m·√(0.5/T) + smile·m², m = ln(K/spot), floored
/// at 0.05, then priced with the analytic pricer (zero dividend yield).
/// Strikes at or above spot become calls, below spot puts.
///
/// Used to produce round-trip test fixtures; not part of the production
/// calibration path.
pub fn synthetic_smile_quotes(
    spot: f64,
    rate: f64,
    strikes: &[f64],
    expiries: &[f64],
    smile: &SmileParams,
) -> Vec<MarketQuote> {
    let mut quotes = Vec::with_capacity(strikes.len() * expiries.len());

    for &expiry in expiries {
        for &strike in strikes {
            let m = (strike / spot).ln();
            let term_adj = (0.5 / expiry).sqrt();
            let vol =
                (smile.base_vol + smile.skew * m * term_adj + smile.smile * m * m).max(SMILE_VOL_FLOOR);

            let kind = if strike >= spot {
                OptionKind::Call
            } else {
                OptionKind::Put
            };
            let c = OptionContract::european(spot, strike, expiry, rate, vol, 0.0, kind);
            quotes.push(MarketQuote {
                strike,
                expiry,
                market_price: analytic::price_value(&c),
                kind,
            });
        }
    }

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_selects_otm_kind_per_strike() {
        let quotes = synthetic_smile_quotes(
            100.0,
            0.05,
            &[90.0, 100.0, 110.0],
            &[0.5],
            &SmileParams::default(),
        );
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].kind, OptionKind::Put);
        assert_eq!(quotes[1].kind, OptionKind::Call);
        assert_eq!(quotes[2].kind, OptionKind::Call);
        assert!(quotes.iter().all(|q| q.market_price > 0.0));
    }

    #[test]
    fn bad_quote_fails_the_whole_sweep() {
        let quotes = vec![
            MarketQuote {
                strike: 100.0,
                expiry: 1.0,
                market_price: 10.0,
                kind: OptionKind::Call,
            },
            MarketQuote {
                strike: -5.0,
                expiry: 1.0,
                market_price: 10.0,
                kind: OptionKind::Call,
            },
        ];
        let err = calibrate(
            &quotes,
            100.0,
            FixedParameters::default(),
            &CalibrationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricerError::InvalidParameter(_)));
    }

    #[test]
    fn empty_grid_yields_empty_summary() {
        let summary = calibrate(
            &[],
            100.0,
            FixedParameters::default(),
            &CalibrationConfig::default(),
        )
        .unwrap();
        assert!(summary.surface.is_empty());
        assert_eq!(summary.rmse, 0.0);
        assert_eq!(summary.quotes, 0);
    }
}
