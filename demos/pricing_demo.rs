// demos/pricing_demo.rs

//! Cross-method pricing comparison on a single contract.
//!
//! Prices the same European call with the closed form, the binomial lattice
//! at several depths, and Monte Carlo under every variance-reduction mode,
//! then cross-checks the closed-form Greeks against finite differences and
//! runs an implied-vol round trip.
//!
//! Usage:
//!     cargo run --example pricing_demo

use anyhow::Result;
use pricer_lib::greeks;
use pricer_lib::models::monte_carlo::{self, McConfig, VarianceReduction};
use pricer_lib::models::{analytic, lattice};
use pricer_lib::calibration::{implied_vol, SolverConfig};
use pricer_lib::{OptionContract, OptionKind};

fn divider(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("  {}", title);
    println!("{}\n", "=".repeat(70));
}

fn main() -> Result<()> {
    let (s, k, t, r, sigma, q) = (100.0, 100.0, 1.0, 0.05, 0.20, 0.02);
    let call = OptionContract::european(s, k, t, r, sigma, q, OptionKind::Call);
    let put = OptionContract::european(s, k, t, r, sigma, q, OptionKind::Put);

    println!("{}", "=".repeat(70));
    println!("  OPTION PRICING & GREEKS DEMO");
    println!("{}", "=".repeat(70));
    println!(
        "  Spot={}  Strike={}  T={}y  r={}%  sigma={}%  q={}%",
        s,
        k,
        t,
        r * 100.0,
        sigma * 100.0,
        q * 100.0
    );

    divider("1. PRICING COMPARISON");

    let bs_call = analytic::price(&call)?;
    let bs_put = analytic::price(&put)?;
    println!("Black-Scholes:");
    println!("  Call: ${:.4}  ({:.3} ms)", bs_call.price, bs_call.elapsed_ms);
    println!("  Put:  ${:.4}  ({:.3} ms)", bs_put.price, bs_put.elapsed_ms);

    let parity = bs_call.price - bs_put.price;
    let expected_parity = s * (-q * t).exp() - k * (-r * t).exp();
    println!(
        "  Put-call parity error: {:.2e}",
        (parity - expected_parity).abs()
    );

    println!("\nMonte Carlo (10,000 paths):");
    for scheme in [
        VarianceReduction::None,
        VarianceReduction::Antithetic,
        VarianceReduction::Stratified,
        VarianceReduction::QuasiRandom,
        VarianceReduction::ControlVariate,
    ] {
        let mc = monte_carlo::price(
            &call,
            &McConfig {
                paths: 10_000,
                scheme,
                seed: 42,
            },
        )?;
        let err_pct = (mc.price - bs_call.price).abs() / bs_call.price * 100.0;
        println!(
            "  {:<32} Call=${:.4}  SE=${:.4}  Err={:.2}%  ({:.1} ms)",
            mc.method, mc.price, mc.std_error, err_pct, mc.elapsed_ms
        );
    }

    let mc_multi = monte_carlo::price_multistep(&call, 10_000, 252, 42)?;
    println!(
        "  {:<32} Call=${:.4}  SE=${:.4}",
        mc_multi.method, mc_multi.price, mc_multi.std_error
    );

    println!("\nBinomial tree:");
    for steps in [100, 500, 1000] {
        let tree = lattice::price(&call, steps)?;
        let err_pct = (tree.price - bs_call.price).abs() / bs_call.price * 100.0;
        println!(
            "  {:<16} Call=${:.4}  Err={:.4}%  ({:.1} ms)",
            tree.method, tree.price, err_pct, tree.elapsed_ms
        );
    }

    let amer_put = OptionContract::american(s, k, t, r, sigma, q, OptionKind::Put);
    let eur_put_tree = lattice::price(&put, 1000)?;
    let amer_put_tree = lattice::price(&amer_put, 1000)?;
    println!(
        "\nAmerican put ${:.4} vs European put ${:.4} (early-exercise premium ${:.4})",
        amer_put_tree.price,
        eur_put_tree.price,
        amer_put_tree.price - eur_put_tree.price
    );

    divider("2. GREEKS: CLOSED FORM vs FINITE DIFFERENCE");

    let bs_greeks = analytic::greeks(&call)?;
    let fd_greeks = greeks::finite_difference_default(&call)?;

    println!("  {:<8} {:>14} {:>14}", "", "analytic", "finite-diff");
    for (name, a, b) in [
        ("delta", bs_greeks.delta, fd_greeks.delta),
        ("gamma", bs_greeks.gamma, fd_greeks.gamma),
        ("theta", bs_greeks.theta, fd_greeks.theta),
        ("vega", bs_greeks.vega, fd_greeks.vega),
        ("rho", bs_greeks.rho, fd_greeks.rho),
        ("vanna", bs_greeks.vanna, fd_greeks.vanna),
        ("volga", bs_greeks.volga, fd_greeks.volga),
    ] {
        println!("  {:<8} {:>14.6} {:>14.6}", name, a, b);
    }
    println!(
        "  {:<8} {:>14} {:>14.6}   (finite-diff only)",
        "charm", "-", fd_greeks.charm
    );
    println!(
        "  {:<8} {:>14} {:>14.6}   (finite-diff only)",
        "speed", "-", fd_greeks.speed
    );

    divider("3. IMPLIED VOL ROUND TRIP");

    let market_price = bs_call.price;
    let iv = implied_vol::solve(
        market_price,
        s,
        k,
        t,
        r,
        q,
        OptionKind::Call,
        &SolverConfig::default(),
    )?;
    println!(
        "  Market ${:.4} at sigma={:.2}% -> recovered implied vol {:.4}% (err {:.2e})",
        market_price,
        sigma * 100.0,
        iv * 100.0,
        (iv - sigma).abs()
    );

    Ok(())
}
