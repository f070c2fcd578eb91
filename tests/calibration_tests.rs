mod test_utils;

use pricer_lib::calibration::{calibrate, synthetic_smile_quotes};
use pricer_lib::{
    calibrate_surface, CalibrationConfig, FixedParameters, OptionKind, SmileParams,
};
use test_utils::create_test_config;

fn default_grid() -> (Vec<f64>, Vec<f64>) {
    let strikes = vec![80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0, 120.0];
    let expiries = vec![0.25, 0.5, 1.0, 1.5, 2.0];
    (strikes, expiries)
}

#[test]
fn synthetic_smile_round_trips_with_low_error() {
    let (strikes, expiries) = default_grid();
    let smile = SmileParams {
        base_vol: 0.20,
        skew: -0.10,
        smile: 0.05,
    };
    let quotes = synthetic_smile_quotes(100.0, 0.05, &strikes, &expiries, &smile);
    assert_eq!(quotes.len(), 45);

    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate(&quotes, 100.0, fixed, &create_test_config()).unwrap();

    println!(
        "calibrated {} quotes: rmse={:.6} max={:.6} in {:.1} ms",
        summary.quotes, summary.rmse, summary.max_error, summary.elapsed_ms
    );
    assert_eq!(summary.quotes, 45);
    assert!(summary.rmse < 0.01, "rmse: {}", summary.rmse);
    assert!(summary.max_error < 0.01, "max error: {}", summary.max_error);
}

#[test]
fn surface_preserves_quote_order_one_point_per_quote() {
    let (strikes, expiries) = default_grid();
    let quotes = synthetic_smile_quotes(100.0, 0.05, &strikes, &expiries, &SmileParams::default());
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate(&quotes, 100.0, fixed, &create_test_config()).unwrap();

    assert_eq!(summary.surface.len(), quotes.len());
    for (point, quote) in summary.surface.iter().zip(&quotes) {
        assert_eq!(point.strike, quote.strike);
        assert_eq!(point.expiry, quote.expiry);
        assert_eq!(point.market_price, quote.market_price);
    }
}

#[test]
fn negative_skew_lifts_low_strike_vols_above_atm() {
    let strikes = vec![80.0, 90.0, 100.0, 110.0, 120.0];
    let expiries = vec![1.0];
    let smile = SmileParams {
        base_vol: 0.20,
        skew: -0.10,
        smile: 0.05,
    };
    let quotes = synthetic_smile_quotes(100.0, 0.05, &strikes, &expiries, &smile);
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate(&quotes, 100.0, fixed, &create_test_config()).unwrap();

    let iv_at = |strike: f64| {
        summary
            .surface
            .iter()
            .find(|p| (p.strike - strike).abs() < 1e-9)
            .map(|p| p.implied_vol)
            .expect("strike missing from surface")
    };
    assert!(
        iv_at(80.0) > iv_at(100.0),
        "skew not recovered: iv(80)={} iv(100)={}",
        iv_at(80.0),
        iv_at(100.0)
    );
}

#[test]
fn recovered_vols_stay_within_solver_bounds() {
    let (strikes, expiries) = default_grid();
    let quotes = synthetic_smile_quotes(100.0, 0.05, &strikes, &expiries, &SmileParams::default());
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate(&quotes, 100.0, fixed, &create_test_config()).unwrap();

    for point in &summary.surface {
        assert!(point.implied_vol > 0.0);
        assert!(point.implied_vol < 5.0, "vol at K={}: {}", point.strike, point.implied_vol);
    }
}

#[test]
fn fast_preset_is_good_enough_for_the_round_trip() {
    let (strikes, expiries) = default_grid();
    let quotes = synthetic_smile_quotes(100.0, 0.05, &strikes, &expiries, &SmileParams::default());
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate(&quotes, 100.0, fixed, &CalibrationConfig::fast()).unwrap();
    assert!(summary.rmse < 0.01, "rmse: {}", summary.rmse);
}

#[test]
fn top_level_wrapper_returns_the_same_summary() {
    let quotes = synthetic_smile_quotes(
        100.0,
        0.05,
        &[90.0, 100.0, 110.0],
        &[0.5],
        &SmileParams::default(),
    );
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let summary = calibrate_surface(&quotes, 100.0, fixed, &create_test_config()).unwrap();
    assert_eq!(summary.quotes, 3);
    assert!(summary.rmse < 0.01);
}

#[test]
fn invalid_spot_is_rejected() {
    let quotes = synthetic_smile_quotes(
        100.0,
        0.05,
        &[100.0],
        &[1.0],
        &SmileParams::default(),
    );
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    assert!(calibrate(&quotes, 0.0, fixed, &create_test_config()).is_err());
    assert!(calibrate(&quotes, f64::NAN, fixed, &create_test_config()).is_err());
}

#[test]
fn generator_marks_wings_with_otm_kinds() {
    let quotes = synthetic_smile_quotes(
        100.0,
        0.05,
        &[80.0, 100.0, 120.0],
        &[1.0],
        &SmileParams::default(),
    );
    assert_eq!(quotes[0].kind, OptionKind::Put);
    assert_eq!(quotes[1].kind, OptionKind::Call);
    assert_eq!(quotes[2].kind, OptionKind::Call);
}
