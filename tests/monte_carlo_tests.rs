mod test_utils;

use pricer_lib::models::monte_carlo::{self, McConfig, VarianceReduction};
use pricer_lib::models::analytic;
use pricer_lib::{OptionContract, OptionKind};
use test_utils::atm_call;

fn config(paths: usize, scheme: VarianceReduction) -> McConfig {
    McConfig {
        paths,
        scheme,
        seed: 42,
    }
}

#[test]
fn antithetic_mc_converges_to_analytic() {
    let c = atm_call();
    let bs = analytic::price(&c).unwrap().price;
    let mc = monte_carlo::price(&c, &config(50_000, VarianceReduction::Antithetic)).unwrap();

    let rel_err = (mc.price - bs).abs() / bs;
    assert!(
        rel_err < 0.01,
        "antithetic 50k paths off by {:.3}% (mc={}, bs={})",
        rel_err * 100.0,
        mc.price,
        bs
    );
    assert_eq!(mc.paths, 50_000);
}

#[test]
fn antithetic_standard_error_is_not_worse_than_plain() {
    let c = atm_call();
    let plain = monte_carlo::price(&c, &config(10_000, VarianceReduction::None)).unwrap();
    let anti = monte_carlo::price(&c, &config(10_000, VarianceReduction::Antithetic)).unwrap();

    // Conservative bound: pairing must not inflate the reported error.
    assert!(
        anti.std_error <= plain.std_error * 1.5,
        "antithetic SE {} vs plain SE {}",
        anti.std_error,
        plain.std_error
    );
}

#[test]
fn control_variate_tightens_the_estimate() {
    let c = atm_call();
    let bs = analytic::price(&c).unwrap().price;
    let plain = monte_carlo::price(&c, &config(10_000, VarianceReduction::None)).unwrap();
    let cv = monte_carlo::price(&c, &config(10_000, VarianceReduction::ControlVariate)).unwrap();

    let rel_err = (cv.price - bs).abs() / bs;
    assert!(rel_err < 0.02, "control variate off by {:.3}%", rel_err * 100.0);
    // The terminal price is strongly correlated with a call payoff, so the
    // regression adjustment should cut the reported error.
    assert!(
        cv.std_error < plain.std_error,
        "control variate SE {} not below plain SE {}",
        cv.std_error,
        plain.std_error
    );
}

#[test]
fn stratified_sampling_converges() {
    let c = atm_call();
    let bs = analytic::price(&c).unwrap().price;
    let mc = monte_carlo::price(&c, &config(10_000, VarianceReduction::Stratified)).unwrap();
    let rel_err = (mc.price - bs).abs() / bs;
    assert!(rel_err < 0.01, "stratified off by {:.3}%", rel_err * 100.0);
}

#[test]
fn quasi_random_sampling_converges() {
    let c = atm_call();
    let bs = analytic::price(&c).unwrap().price;
    let mc = monte_carlo::price(&c, &config(10_000, VarianceReduction::QuasiRandom)).unwrap();
    let rel_err = (mc.price - bs).abs() / bs;
    assert!(rel_err < 0.01, "quasi-random off by {:.3}%", rel_err * 100.0);
}

#[test]
fn otm_put_price_is_positive() {
    let c = OptionContract::european(100.0, 110.0, 0.5, 0.05, 0.25, 0.0, OptionKind::Put);
    let mc = monte_carlo::price(&c, &config(10_000, VarianceReduction::Antithetic)).unwrap();
    assert!(mc.price > 0.0);
    assert!(mc.std_error > 0.0);
}

#[test]
fn multistep_walk_converges_to_analytic() {
    let c = atm_call();
    let bs = analytic::price(&c).unwrap().price;
    let mc = monte_carlo::price_multistep(&c, 50_000, 252, 42).unwrap();

    let rel_err = (mc.price - bs).abs() / bs;
    assert!(rel_err < 0.02, "multistep off by {:.3}%", rel_err * 100.0);
    assert_eq!(mc.method, "MC MultiStep (252 steps)");
    assert_eq!(mc.paths, 50_000);
}

#[test]
fn single_step_price_is_seed_deterministic() {
    let c = atm_call();
    for scheme in [
        VarianceReduction::None,
        VarianceReduction::Antithetic,
        VarianceReduction::Stratified,
        VarianceReduction::QuasiRandom,
        VarianceReduction::ControlVariate,
    ] {
        let a = monte_carlo::price(&c, &config(5_000, scheme)).unwrap();
        let b = monte_carlo::price(&c, &config(5_000, scheme)).unwrap();
        assert_eq!(a.price, b.price, "scheme {:?} not reproducible", scheme);
    }
}

#[test]
fn different_seeds_move_the_estimate() {
    let c = atm_call();
    let a = monte_carlo::price(
        &c,
        &McConfig {
            paths: 5_000,
            scheme: VarianceReduction::None,
            seed: 1,
        },
    )
    .unwrap();
    let b = monte_carlo::price(
        &c,
        &McConfig {
            paths: 5_000,
            scheme: VarianceReduction::None,
            seed: 2,
        },
    )
    .unwrap();
    assert_ne!(a.price, b.price);
}
