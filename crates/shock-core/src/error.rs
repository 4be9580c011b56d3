use thiserror::Error;

use crate::Quantity;

/// Errors raised while evaluating shock relations or sampling a Mach grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShockError {
    #[error("invalid gas properties: gamma = {gamma} (must be > 1), R = {gas_constant} (must be > 0)")]
    InvalidGas { gamma: f64, gas_constant: f64 },

    #[error("invalid Mach grid: start = {start}, stop = {stop}, step = {step}")]
    InvalidGrid { start: f64, stop: f64, step: f64 },

    #[error("upstream Mach number must be finite, got {0}")]
    InvalidMach(f64),

    #[error("upstream Mach number {0} is subsonic; a normal shock requires M1 >= 1")]
    SubsonicUpstream(f64),

    #[error("{quantity} is not finite at M1 = {mach}")]
    NonFinite { quantity: Quantity, mach: f64 },
}
