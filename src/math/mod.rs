//! Standard normal distribution helpers shared by the pricers and the
//! random sequence generators.

use statrs::distribution::{ContinuousCDF, Normal};

/// Standard normal CDF via the error function.
pub fn norm_cdf(x: f64) -> f64 {
    // 0.5 * [1 + erf(x / sqrt(2))]
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal PDF.
pub fn norm_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse standard normal CDF. The input is clamped to the open unit
/// interval so stratified/quasi-random sampling never maps an endpoint to
/// an infinite draw.
pub fn norm_inv(u: f64) -> f64 {
    let u = u.clamp(1e-12, 1.0 - 1e-12);
    Normal::new(0.0, 1.0).unwrap().inverse_cdf(u)
}
