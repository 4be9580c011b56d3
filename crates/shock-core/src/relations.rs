//! Closed-form normal-shock relations for a calorically perfect gas.
//!
//! Every function takes the upstream Mach number `m1` and the gas, and
//! evaluates the formula directly. None of them validate their input: an `m1`
//! below the real-root threshold of the downstream Mach relation produces NaN,
//! as the arithmetic dictates. Use [`crate::ShockState::evaluate`] for a
//! checked evaluation.

use crate::constants::GasProperties;

/// Static pressure ratio across the shock.
///
/// p₂/p₁ = 1 + 2γ/(γ+1)·(M₁² − 1)
pub fn pressure_ratio(m1: f64, gas: &GasProperties) -> f64 {
    let m1_sq = m1 * m1;
    1.0 + (2.0 * gas.gamma / gas.gamma_plus_one()) * (m1_sq - 1.0)
}

/// Density ratio across the shock.
///
/// ρ₂/ρ₁ = (γ+1)·M₁² / (2 + (γ−1)·M₁²)
pub fn density_ratio(m1: f64, gas: &GasProperties) -> f64 {
    let m1_sq = m1 * m1;
    (gas.gamma_plus_one() * m1_sq) / (2.0 + gas.gamma_minus_one() * m1_sq)
}

/// Static temperature ratio across the shock.
///
/// T₂/T₁ = p₂/p₁ · (2 + (γ−1)·M₁²) / ((γ+1)·M₁²)
///
/// Uses the inverted density relation directly rather than dividing by
/// [`density_ratio`]; the two agree to within rounding.
pub fn temperature_ratio(m1: f64, gas: &GasProperties) -> f64 {
    let m1_sq = m1 * m1;
    let inv_density = (2.0 + gas.gamma_minus_one() * m1_sq) / (gas.gamma_plus_one() * m1_sq);
    pressure_ratio(m1, gas) * inv_density
}

/// Downstream Mach number.
///
/// M₂ = √[(1 + (γ−1)/2·M₁²) / (γM₁² − (γ−1)/2)]
pub fn downstream_mach(m1: f64, gas: &GasProperties) -> f64 {
    let m1_sq = m1 * m1;
    let half_gm1 = gas.gamma_minus_one() / 2.0;
    ((1.0 + half_gm1 * m1_sq) / (gas.gamma * m1_sq - half_gm1)).sqrt()
}

/// Legacy "stagnation ratio": exp(−(p₂/p₁) / R).
///
/// This is NOT the isentropic stagnation-pressure ratio. It treats the static
/// pressure ratio as an entropy change and divides by the bare gas constant.
/// It is kept because the reference chart plots it; see
/// [`isentropic_stagnation_ratio`] for the textbook relation.
pub fn stagnation_ratio(m1: f64, gas: &GasProperties) -> f64 {
    (-pressure_ratio(m1, gas) / gas.gas_constant).exp()
}

/// Stagnation pressure ratio p₀₂/p₀₁ across the shock.
///
/// p₀₂/p₀₁ = [(γ+1)M₁² / ((γ−1)M₁² + 2)]^(γ/(γ−1)) · [(γ+1) / (2γM₁² − (γ−1))]^(1/(γ−1))
pub fn isentropic_stagnation_ratio(m1: f64, gas: &GasProperties) -> f64 {
    let gm1 = gas.gamma_minus_one();
    let m1_sq = m1 * m1;
    let compression = density_ratio(m1, gas).powf(gas.gamma / gm1);
    let expansion = (gas.gamma_plus_one() / (2.0 * gas.gamma * m1_sq - gm1)).powf(1.0 / gm1);
    compression * expansion
}

/// Downstream-to-upstream velocity ratio u₂/u₁ = ρ₁/ρ₂.
pub fn velocity_ratio(m1: f64, gas: &GasProperties) -> f64 {
    1.0 / density_ratio(m1, gas)
}
