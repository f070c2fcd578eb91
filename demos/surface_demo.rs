// demos/surface_demo.rs

//! Synthetic-smile calibration round trip.
//!
//! Builds a quote grid from a parametric smile, calibrates the implied-vol
//! surface back in parallel, writes the per-quote surface to
//! `surface_points.csv` and plots the one-year smile slice to
//! `iv_smile.svg`.
//!
//! Usage:
//!     cargo run --example surface_demo

use std::error::Error;

use plotters::prelude::*;
use pricer_lib::{calibrate_surface, synthetic_smile, FixedParameters, SmileParams};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let spot = 100.0;
    let fixed = FixedParameters { r: 0.05, q: 0.0 };
    let strikes: Vec<f64> = (0..9).map(|i| 80.0 + 5.0 * i as f64).collect();
    let expiries = vec![0.25, 0.5, 1.0, 1.5, 2.0];
    let smile = SmileParams {
        base_vol: 0.20,
        skew: -0.10,
        smile: 0.05,
    };

    let quotes = synthetic_smile(spot, fixed.r, &strikes, &expiries, &smile);
    println!(
        "Generated {} synthetic quotes ({} strikes x {} expiries)",
        quotes.len(),
        strikes.len(),
        expiries.len()
    );

    let config = pricer_lib::default_configs::production();
    let summary = calibrate_surface(&quotes, spot, fixed, &config)?;

    println!(
        "Calibration: RMSE={:.6}  max error={:.6}  ({:.1} ms, {} quotes)",
        summary.rmse, summary.max_error, summary.elapsed_ms, summary.quotes
    );

    // Implied-vol grid, strikes down the side, expiries across.
    print!("{:>8}", "K\\T");
    for t in &expiries {
        print!("{:>8.2}", t);
    }
    println!();
    for &strike in &strikes {
        print!("{:>8.0}", strike);
        for &expiry in &expiries {
            let iv = summary
                .surface
                .iter()
                .find(|p| (p.strike - strike).abs() < 1e-9 && (p.expiry - expiry).abs() < 1e-9)
                .map(|p| p.implied_vol)
                .unwrap_or(f64::NAN);
            print!("{:>7.2}%", iv * 100.0);
        }
        println!();
    }

    // CSV export of the full surface.
    let mut writer = csv::Writer::from_path("surface_points.csv")?;
    writer.write_record(["strike", "expiry", "implied_vol", "market_price", "model_price", "error"])?;
    for p in &summary.surface {
        writer.write_record(&[
            p.strike.to_string(),
            p.expiry.to_string(),
            p.implied_vol.to_string(),
            p.market_price.to_string(),
            p.model_price.to_string(),
            p.error.to_string(),
        ])?;
    }
    writer.flush()?;
    println!("Surface written to surface_points.csv");

    // Plot the one-year smile slice.
    let slice: Vec<(f64, f64)> = summary
        .surface
        .iter()
        .filter(|p| (p.expiry - 1.0).abs() < 1e-9)
        .map(|p| (p.strike, p.implied_vol * 100.0))
        .collect();

    let y_min = slice.iter().map(|p| p.1).fold(f64::INFINITY, f64::min) - 1.0;
    let y_max = slice.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max) + 1.0;

    let root = SVGBackend::new("iv_smile.svg", (1024, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Calibrated IV smile, T = 1y", ("sans-serif", 28))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(75.0..125.0, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Strike")
        .y_desc("Implied Vol (%)")
        .draw()?;

    chart.draw_series(
        slice
            .iter()
            .map(|pt| Circle::new(*pt, 4, BLUE.filled())),
    )?;
    chart.draw_series(std::iter::once(PathElement::new(slice.clone(), RED)))?;

    println!("Smile plot written to iv_smile.svg");
    Ok(())
}
