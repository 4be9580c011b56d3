use crate::error::ShockError;

/// Specific heat ratio used by the reference chart (`gamma_1.2.png`).
pub const DEFAULT_GAMMA: f64 = 1.2;

/// Gas constant divisor used by the legacy stagnation ratio, J/(kg·K).
///
/// This is numerically the universal gas constant in J/(mol·K); the legacy
/// relation uses it as-is.
pub const DEFAULT_GAS_CONSTANT: f64 = 8.314462618;

/// Properties of a calorically perfect gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProperties {
    /// Specific heat ratio cp/cv.
    pub gamma: f64,
    /// Specific gas constant R.
    pub gas_constant: f64,
}

impl GasProperties {
    /// Build a validated gas. Requires a finite `gamma > 1` and a finite
    /// `gas_constant > 0`.
    pub fn new(gamma: f64, gas_constant: f64) -> Result<Self, ShockError> {
        let gas = Self {
            gamma,
            gas_constant,
        };
        gas.validate()?;
        Ok(gas)
    }

    pub fn validate(&self) -> Result<(), ShockError> {
        let gamma_ok = self.gamma.is_finite() && self.gamma > 1.0;
        let r_ok = self.gas_constant.is_finite() && self.gas_constant > 0.0;
        if gamma_ok && r_ok {
            Ok(())
        } else {
            Err(ShockError::InvalidGas {
                gamma: self.gamma,
                gas_constant: self.gas_constant,
            })
        }
    }

    /// γ − 1
    pub fn gamma_minus_one(&self) -> f64 {
        self.gamma - 1.0
    }

    /// γ + 1
    pub fn gamma_plus_one(&self) -> f64 {
        self.gamma + 1.0
    }
}

impl Default for GasProperties {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            gas_constant: DEFAULT_GAS_CONSTANT,
        }
    }
}
