use crate::constants::GasProperties;
use crate::error::ShockError;
use crate::state::{Quantity, ShockState, StagnationModel};

/// Slack subtracted before rounding the sample count up, so that a span that
/// is an exact multiple of the step (up to rounding) excludes `stop`.
const COUNT_TOLERANCE: f64 = 1e-9;

/// Evenly spaced upstream Mach numbers `start + i·step`, `stop` excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachGrid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl MachGrid {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, ShockError> {
        let grid = Self { start, stop, step };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), ShockError> {
        let finite = self.start.is_finite() && self.stop.is_finite() && self.step.is_finite();
        if finite && self.step > 0.0 && self.stop > self.start {
            Ok(())
        } else {
            Err(ShockError::InvalidGrid {
                start: self.start,
                stop: self.stop,
                step: self.step,
            })
        }
    }

    /// Number of samples: ⌈(stop − start)/step⌉.
    pub fn len(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        ((self.stop - self.start) / self.step - COUNT_TOLERANCE).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th sample. Computed from the index, never accumulated.
    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.value(i))
    }

    /// Last sample, if any.
    pub fn last(&self) -> Option<f64> {
        self.len().checked_sub(1).map(|i| self.value(i))
    }
}

impl Default for MachGrid {
    fn default() -> Self {
        Self {
            start: 1.0,
            stop: 10.0,
            step: 0.01,
        }
    }
}

/// Column-oriented shock relations over a [`MachGrid`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShockTable {
    /// Upstream Mach samples M₁.
    pub mach_numbers: Vec<f64>,
    pub downstream_mach: Vec<f64>,
    pub stagnation_ratio: Vec<f64>,
    pub pressure_ratio: Vec<f64>,
    pub temperature_ratio: Vec<f64>,
    pub density_ratio: Vec<f64>,
}

impl ShockTable {
    fn with_capacity(n: usize) -> Self {
        Self {
            mach_numbers: Vec::with_capacity(n),
            downstream_mach: Vec::with_capacity(n),
            stagnation_ratio: Vec::with_capacity(n),
            pressure_ratio: Vec::with_capacity(n),
            temperature_ratio: Vec::with_capacity(n),
            density_ratio: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, state: &ShockState) {
        self.mach_numbers.push(state.upstream_mach);
        self.downstream_mach.push(state.downstream_mach);
        self.stagnation_ratio.push(state.stagnation_ratio);
        self.pressure_ratio.push(state.pressure_ratio);
        self.temperature_ratio.push(state.temperature_ratio);
        self.density_ratio.push(state.density_ratio);
    }

    pub fn len(&self) -> usize {
        self.mach_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mach_numbers.is_empty()
    }

    pub fn column(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::DownstreamMach => &self.downstream_mach,
            Quantity::StagnationRatio => &self.stagnation_ratio,
            Quantity::PressureRatio => &self.pressure_ratio,
            Quantity::TemperatureRatio => &self.temperature_ratio,
            Quantity::DensityRatio => &self.density_ratio,
        }
    }

    /// Row `i` as a [`ShockState`], or `None` if any column is too short.
    pub fn state(&self, i: usize) -> Option<ShockState> {
        Some(ShockState {
            upstream_mach: *self.mach_numbers.get(i)?,
            downstream_mach: *self.downstream_mach.get(i)?,
            density_ratio: *self.density_ratio.get(i)?,
            pressure_ratio: *self.pressure_ratio.get(i)?,
            temperature_ratio: *self.temperature_ratio.get(i)?,
            stagnation_ratio: *self.stagnation_ratio.get(i)?,
        })
    }

    /// `(M₁, value)` pairs for one quantity, in grid order.
    pub fn points(&self, quantity: Quantity) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mach_numbers
            .iter()
            .copied()
            .zip(self.column(quantity).iter().copied())
    }
}

/// Evaluate every relation at every grid sample in one pass.
///
/// Stops at the first sample that fails validation.
pub fn sweep(
    grid: &MachGrid,
    gas: &GasProperties,
    model: StagnationModel,
) -> Result<ShockTable, ShockError> {
    grid.validate()?;
    gas.validate()?;

    let mut table = ShockTable::with_capacity(grid.len());
    for m1 in grid.values() {
        let state = ShockState::evaluate(m1, gas, model)?;
        table.push(&state);
    }
    Ok(table)
}
