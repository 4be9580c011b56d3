use std::fmt;

use crate::constants::GasProperties;
use crate::error::ShockError;
use crate::relations;

/// Which relation produces the stagnation-ratio curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StagnationModel {
    /// exp(−(p₂/p₁)/R), as plotted on the reference chart.
    #[default]
    Legacy,
    /// Textbook isentropic stagnation-pressure ratio p₀₂/p₀₁.
    Isentropic,
}

impl StagnationModel {
    pub fn evaluate(self, m1: f64, gas: &GasProperties) -> f64 {
        match self {
            StagnationModel::Legacy => relations::stagnation_ratio(m1, gas),
            StagnationModel::Isentropic => relations::isentropic_stagnation_ratio(m1, gas),
        }
    }
}

/// The five quantities derived from the upstream Mach number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    DownstreamMach,
    StagnationRatio,
    PressureRatio,
    TemperatureRatio,
    DensityRatio,
}

impl Quantity {
    pub const ALL: [Quantity; 5] = [
        Quantity::DownstreamMach,
        Quantity::StagnationRatio,
        Quantity::PressureRatio,
        Quantity::TemperatureRatio,
        Quantity::DensityRatio,
    ];

    /// Short plot label.
    pub fn label(self) -> &'static str {
        match self {
            Quantity::DownstreamMach => "M2",
            Quantity::StagnationRatio => "p0,2/p0,1",
            Quantity::PressureRatio => "p2/p1",
            Quantity::TemperatureRatio => "T2/T1",
            Quantity::DensityRatio => "rho2/rho1",
        }
    }

    /// Evaluate this quantity alone, without validation.
    pub fn evaluate(self, m1: f64, gas: &GasProperties, model: StagnationModel) -> f64 {
        match self {
            Quantity::DownstreamMach => relations::downstream_mach(m1, gas),
            Quantity::StagnationRatio => model.evaluate(m1, gas),
            Quantity::PressureRatio => relations::pressure_ratio(m1, gas),
            Quantity::TemperatureRatio => relations::temperature_ratio(m1, gas),
            Quantity::DensityRatio => relations::density_ratio(m1, gas),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flow conditions across a normal shock for one upstream Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockState {
    /// Upstream Mach number M₁.
    pub upstream_mach: f64,
    /// Downstream Mach number M₂.
    pub downstream_mach: f64,
    /// ρ₂/ρ₁
    pub density_ratio: f64,
    /// p₂/p₁
    pub pressure_ratio: f64,
    /// T₂/T₁
    pub temperature_ratio: f64,
    /// Stagnation ratio per the chosen [`StagnationModel`].
    pub stagnation_ratio: f64,
}

impl ShockState {
    /// Evaluate all relations at `m1`.
    ///
    /// Rejects a non-finite or subsonic `m1`, and reports the first quantity
    /// that comes out non-finite.
    pub fn evaluate(
        m1: f64,
        gas: &GasProperties,
        model: StagnationModel,
    ) -> Result<Self, ShockError> {
        if !m1.is_finite() {
            return Err(ShockError::InvalidMach(m1));
        }
        if m1 < 1.0 {
            return Err(ShockError::SubsonicUpstream(m1));
        }

        let state = Self {
            upstream_mach: m1,
            downstream_mach: relations::downstream_mach(m1, gas),
            density_ratio: relations::density_ratio(m1, gas),
            pressure_ratio: relations::pressure_ratio(m1, gas),
            temperature_ratio: relations::temperature_ratio(m1, gas),
            stagnation_ratio: model.evaluate(m1, gas),
        };

        match Quantity::ALL.into_iter().find(|&q| !state.get(q).is_finite()) {
            Some(quantity) => Err(ShockError::NonFinite { quantity, mach: m1 }),
            None => Ok(state),
        }
    }

    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::DownstreamMach => self.downstream_mach,
            Quantity::StagnationRatio => self.stagnation_ratio,
            Quantity::PressureRatio => self.pressure_ratio,
            Quantity::TemperatureRatio => self.temperature_ratio,
            Quantity::DensityRatio => self.density_ratio,
        }
    }

    /// u₂/u₁, from mass conservation.
    pub fn velocity_ratio(&self) -> f64 {
        1.0 / self.density_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_matches_individual_relations() {
        let gas = GasProperties::default();
        let state = ShockState::evaluate(3.7, &gas, StagnationModel::Legacy).unwrap();
        for q in Quantity::ALL {
            assert_eq!(
                state.get(q),
                q.evaluate(3.7, &gas, StagnationModel::Legacy),
                "{q} differs between fused and single evaluation"
            );
        }
        assert_relative_eq!(state.velocity_ratio(), relations::velocity_ratio(3.7, &gas));
    }

    #[test]
    fn test_rejects_subsonic_upstream() {
        let gas = GasProperties::default();
        let err = ShockState::evaluate(0.8, &gas, StagnationModel::Legacy).unwrap_err();
        assert_eq!(err, ShockError::SubsonicUpstream(0.8));
    }

    #[test]
    fn test_rejects_non_finite_mach() {
        let gas = GasProperties::default();
        for m1 in [f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                ShockState::evaluate(m1, &gas, StagnationModel::Legacy),
                Err(ShockError::InvalidMach(m1))
            );
        }
        assert!(matches!(
            ShockState::evaluate(f64::NAN, &gas, StagnationModel::Legacy),
            Err(ShockError::InvalidMach(_))
        ));
    }

    #[test]
    fn test_reports_non_finite_result() {
        // The isentropic relation overflows for large M₁ when 1/(γ−1) is huge.
        let gas = GasProperties::new(1.0001, 287.05).unwrap();
        let err = ShockState::evaluate(50.0, &gas, StagnationModel::Isentropic).unwrap_err();
        assert!(
            matches!(err, ShockError::NonFinite { quantity: Quantity::StagnationRatio, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_stagnation_model_selects_relation() {
        let gas = GasProperties::default();
        let legacy = ShockState::evaluate(2.0, &gas, StagnationModel::Legacy).unwrap();
        let isentropic = ShockState::evaluate(2.0, &gas, StagnationModel::Isentropic).unwrap();
        assert_relative_eq!(
            legacy.stagnation_ratio,
            (-legacy.pressure_ratio / gas.gas_constant).exp()
        );
        assert_relative_eq!(
            isentropic.stagnation_ratio,
            relations::isentropic_stagnation_ratio(2.0, &gas)
        );
        assert_eq!(legacy.pressure_ratio, isentropic.pressure_ratio);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = Quantity::ALL.iter().map(|q| q.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Quantity::ALL.len());
    }
}
