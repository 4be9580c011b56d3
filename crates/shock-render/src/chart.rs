//! Backend-neutral description of the dual-axis shock chart.
//!
//! Both the PNG rasteriser and the egui window draw from a [`Chart`], so the
//! two outputs always agree on series, colours, axis ranges and legends.

use shock_core::{Quantity, ShockParams, ShockTable, StagnationModel};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

// "tab" palette
pub const TAB_BLUE: Rgb = Rgb(31, 119, 180);
pub const TAB_ORANGE: Rgb = Rgb(255, 127, 14);
pub const TAB_GREEN: Rgb = Rgb(44, 160, 44);
pub const TAB_RED: Rgb = Rgb(214, 39, 40);
pub const TAB_PURPLE: Rgb = Rgb(148, 103, 189);

impl Rgb {
    pub fn to_plotters(self) -> plotters::style::RGBColor {
        plotters::style::RGBColor(self.0, self.1, self.2)
    }

    pub fn to_egui(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.0, self.1, self.2)
    }
}

/// Which vertical axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left axis.
    Primary,
    /// Right axis, sharing the x axis with the primary one.
    Secondary,
}

/// Where a legend sits relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Above,
    Below,
}

/// Closed value range of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Linearly map `value` from this range onto `target`.
    pub fn map_to(&self, target: &AxisRange, value: f64) -> f64 {
        target.min + (value - self.min) / self.span() * target.span()
    }

    pub fn as_range(&self) -> std::ops::Range<f64> {
        self.min..self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Parameter interval `[t0, t1]` of the segment `a → b` whose y stays in
    /// this range, or `None` if the segment never enters it.
    fn clip_segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
        let (ya, yb) = (a.1, b.1);
        if !ya.is_finite() || !yb.is_finite() {
            return None;
        }
        if ya == yb {
            return self.contains(ya).then_some((0.0, 1.0));
        }
        let t_min = (self.min - ya) / (yb - ya);
        let t_max = (self.max - ya) / (yb - ya);
        let t0 = t_min.min(t_max).max(0.0);
        let t1 = t_min.max(t_max).min(1.0);
        (t0 <= t1).then_some((t0, t1))
    }

    /// Point at parameter `t` on `a → b`, with y pinned inside the range.
    fn lerp(&self, a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
        let x = a.0 + t * (b.0 - a.0);
        let y = a.1 + t * (b.1 - a.1);
        (x, y.clamp(self.min, self.max))
    }
}

/// A labelled vertical axis with a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: String,
    pub range: AxisRange,
    pub legend: LegendPosition,
}

/// One curve on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub quantity: Quantity,
    pub label: String,
    pub color: Rgb,
    pub axis: Axis,
    /// `(M1, value)` in grid order.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Split the curve into runs whose y values stay inside `range`.
    ///
    /// A run that leaves the range ends at the interpolated crossing, and the
    /// next one starts where the curve comes back in. Backends that clamp
    /// out-of-range points to the plot edge draw these runs one by one.
    pub fn clipped_runs(&self, range: &AxisRange) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        if let [only] = self.points.as_slice() {
            if range.contains(only.1) {
                runs.push(vec![*only]);
            }
            return runs;
        }

        let mut current: Vec<(f64, f64)> = Vec::new();
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match range.clip_segment(a, b) {
                Some((t0, t1)) => {
                    if current.is_empty() || t0 > 0.0 {
                        if !current.is_empty() {
                            runs.push(std::mem::take(&mut current));
                        }
                        current.push(range.lerp(a, b, t0));
                    }
                    current.push(range.lerp(a, b, t1));
                    if t1 < 1.0 {
                        runs.push(std::mem::take(&mut current));
                    }
                }
                None => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// Dual-axis chart of the shock relations against upstream Mach number.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub x_range: AxisRange,
    pub primary: AxisSpec,
    pub secondary: AxisSpec,
    pub series: Vec<Series>,
    /// Name/value readouts shown next to the interactive view.
    pub summary: Vec<(String, String)>,
}

pub const PRIMARY_RANGE: AxisRange = AxisRange::new(0.0, 1.0);
pub const SECONDARY_RANGE: AxisRange = AxisRange::new(0.0, 20.0);

/// Curve order, colour and axis for every plotted quantity.
const LAYOUT: [(Quantity, Rgb, Axis); 5] = [
    (Quantity::DownstreamMach, TAB_RED, Axis::Primary),
    (Quantity::StagnationRatio, TAB_GREEN, Axis::Primary),
    (Quantity::PressureRatio, TAB_BLUE, Axis::Secondary),
    (Quantity::TemperatureRatio, TAB_ORANGE, Axis::Secondary),
    (Quantity::DensityRatio, TAB_PURPLE, Axis::Secondary),
];

impl Chart {
    pub fn from_table(table: &ShockTable, params: &ShockParams) -> Self {
        let series = LAYOUT
            .iter()
            .map(|&(quantity, color, axis)| Series {
                quantity,
                label: quantity.label().to_string(),
                color,
                axis,
                points: table.points(quantity).collect(),
            })
            .collect();

        let stagnation = match params.stagnation {
            StagnationModel::Legacy => "exp(-(p2/p1)/R)",
            StagnationModel::Isentropic => "isentropic",
        };
        let m1_range = match (table.mach_numbers.first(), table.mach_numbers.last()) {
            (Some(first), Some(last)) => format!("{first:.2} .. {last:.2}"),
            _ => "empty".to_string(),
        };
        let summary = vec![
            ("gamma".to_string(), format!("{}", params.gas.gamma)),
            ("R".to_string(), format!("{}", params.gas.gas_constant)),
            ("samples".to_string(), table.len().to_string()),
            ("M1".to_string(), m1_range),
            ("p0,2/p0,1".to_string(), stagnation.to_string()),
        ];

        Self {
            title: format!("Normal shock relations, gamma = {}", params.gas.gamma),
            x_label: "M1".to_string(),
            x_range: AxisRange::new(params.grid.start, params.grid.stop),
            primary: AxisSpec {
                label: "M2, p0,2/p0,1".to_string(),
                range: PRIMARY_RANGE,
                legend: LegendPosition::Above,
            },
            secondary: AxisSpec {
                label: "T2/T1, p2/p1, rho2/rho1".to_string(),
                range: SECONDARY_RANGE,
                legend: LegendPosition::Below,
            },
            series,
            summary,
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::Primary => &self.primary,
            Axis::Secondary => &self.secondary,
        }
    }

    pub fn series_on(&self, axis: Axis) -> impl Iterator<Item = &Series> + '_ {
        self.series.iter().filter(move |s| s.axis == axis)
    }

    /// Express a value read on `axis` in primary-axis coordinates.
    pub fn to_primary(&self, axis: Axis, value: f64) -> f64 {
        self.axis(axis).range.map_to(&self.primary.range, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_chart() -> Chart {
        let params = ShockParams::default();
        let table = shock_core::compute(&params).unwrap();
        Chart::from_table(&table, &params)
    }

    #[test]
    fn test_series_split_across_axes() {
        let chart = default_chart();
        let primary: Vec<Quantity> = chart.series_on(Axis::Primary).map(|s| s.quantity).collect();
        let secondary: Vec<Quantity> = chart.series_on(Axis::Secondary).map(|s| s.quantity).collect();
        assert_eq!(primary, vec![Quantity::DownstreamMach, Quantity::StagnationRatio]);
        assert_eq!(
            secondary,
            vec![
                Quantity::PressureRatio,
                Quantity::TemperatureRatio,
                Quantity::DensityRatio
            ]
        );
    }

    #[test]
    fn test_fixed_axis_ranges_and_legends() {
        let chart = default_chart();
        assert_eq!(chart.primary.range, AxisRange::new(0.0, 1.0));
        assert_eq!(chart.secondary.range, AxisRange::new(0.0, 20.0));
        assert_eq!(chart.primary.legend, LegendPosition::Above);
        assert_eq!(chart.secondary.legend, LegendPosition::Below);
        assert_eq!(chart.x_range, AxisRange::new(1.0, 10.0));
    }

    #[test]
    fn test_every_series_has_unique_colour_and_full_length() {
        let chart = default_chart();
        assert_eq!(chart.series.len(), 5);
        for (i, a) in chart.series.iter().enumerate() {
            assert_eq!(a.points.len(), 900, "{} has {} points", a.label, a.points.len());
            for b in &chart.series[i + 1..] {
                assert_ne!(a.color, b.color, "{} and {} share a colour", a.label, b.label);
            }
        }
        let m2 = &chart.series[0];
        assert_eq!(m2.color, TAB_RED);
        assert_eq!(m2.label, "M2");
    }

    #[test]
    fn test_secondary_values_map_onto_primary_axis() {
        let chart = default_chart();
        assert_relative_eq!(chart.to_primary(Axis::Secondary, 0.0), 0.0);
        assert_relative_eq!(chart.to_primary(Axis::Secondary, 20.0), 1.0);
        assert_relative_eq!(chart.to_primary(Axis::Secondary, 5.0), 0.25);
        assert_relative_eq!(chart.to_primary(Axis::Primary, 0.4), 0.4);

        // Round trip used by the right-axis tick formatter.
        let back = PRIMARY_RANGE.map_to(&SECONDARY_RANGE, chart.to_primary(Axis::Secondary, 7.5));
        assert_relative_eq!(back, 7.5);
    }

    #[test]
    fn test_clipped_runs_stay_inside_axis_range() {
        let chart = default_chart();
        for series in &chart.series {
            let range = chart.axis(series.axis).range;
            for run in series.clipped_runs(&range) {
                for &(m1, y) in &run {
                    assert!(
                        range.contains(y),
                        "{} run point ({m1}, {y}) outside [{}, {}]",
                        series.label,
                        range.min,
                        range.max
                    );
                }
            }
        }
    }

    #[test]
    fn test_pressure_ratio_is_cut_where_it_leaves_the_right_axis() {
        let chart = default_chart();
        let pressure = chart
            .series
            .iter()
            .find(|s| s.quantity == Quantity::PressureRatio)
            .unwrap();
        let runs = pressure.clipped_runs(&SECONDARY_RANGE);
        assert_eq!(runs.len(), 1, "p2/p1 only leaves [0, 20] once");

        // 1 + (2.4/2.2)(M1² − 1) = 20  →  M1 = √(1 + 19·2.2/2.4) ≈ 4.2915
        let &(m1_exit, y_exit) = runs[0].last().unwrap();
        assert_relative_eq!(y_exit, 20.0);
        assert!((m1_exit - 4.2915).abs() < 0.01, "exit at M1 = {m1_exit}");
        assert!(runs[0].iter().all(|&(m1, _)| m1 <= m1_exit));
    }

    #[test]
    fn test_clipped_runs_split_and_rejoin() {
        let series = Series {
            quantity: Quantity::PressureRatio,
            label: "p2/p1".to_string(),
            color: TAB_BLUE,
            axis: Axis::Secondary,
            points: vec![(0.0, 0.5), (1.0, 1.5), (2.0, 3.0), (3.0, 0.5), (4.0, 0.25)],
        };
        let range = AxisRange::new(0.0, 1.0);
        let runs = series.clipped_runs(&range);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(0.0, 0.5), (0.5, 1.0)]);
        assert_relative_eq!(runs[1][0].0, 2.8);
        assert_relative_eq!(runs[1][0].1, 1.0);
        assert_eq!(&runs[1][1..], &[(3.0, 0.5), (4.0, 0.25)]);
    }

    #[test]
    fn test_clipped_runs_bridge_a_segment_crossing_the_whole_range() {
        let series = Series {
            quantity: Quantity::DownstreamMach,
            label: "M2".to_string(),
            color: TAB_RED,
            axis: Axis::Primary,
            points: vec![(0.0, -1.0), (1.0, 2.0)],
        };
        let runs = series.clipped_runs(&AxisRange::new(0.0, 1.0));
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0][0].0, 1.0 / 3.0);
        assert_relative_eq!(runs[0][1].0, 2.0 / 3.0);

        let outside = Series {
            points: vec![(0.0, 5.0)],
            ..series
        };
        assert!(outside.clipped_runs(&AxisRange::new(0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_summary_reports_constants() {
        let chart = default_chart();
        let get = |key: &str| {
            chart
                .summary
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("gamma"), "1.2");
        assert_eq!(get("samples"), "900");
        assert_eq!(get("M1"), "1.00 .. 9.99");
    }
}
