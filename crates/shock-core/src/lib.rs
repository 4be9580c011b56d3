pub mod constants;
pub mod error;
pub mod relations;
pub mod state;
pub mod sweep;

pub use constants::GasProperties;
pub use error::ShockError;
pub use state::{Quantity, ShockState, StagnationModel};
pub use sweep::{MachGrid, ShockTable};

// ---------------------------------------------------------------------------
// Shared interface types used by the render crate and the binary
// ---------------------------------------------------------------------------

/// Everything needed to tabulate the shock relations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShockParams {
    /// Gas the shock travels through.
    pub gas: GasProperties,
    /// Upstream Mach numbers to sample.
    pub grid: MachGrid,
    /// Relation used for the stagnation-ratio curve.
    pub stagnation: StagnationModel,
}

/// Run the full pipeline: validate parameters, then sweep the grid.
pub fn compute(params: &ShockParams) -> Result<ShockTable, ShockError> {
    params.gas.validate()?;
    params.grid.validate()?;
    sweep::sweep(&params.grid, &params.gas, params.stagnation)
}
