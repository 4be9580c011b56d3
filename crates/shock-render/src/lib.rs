pub mod app;
pub mod chart;
pub mod plot_view;
pub mod raster;
pub mod renderer;
pub mod sink;
pub mod ui;

use std::path::PathBuf;

use shock_core::{ShockError, ShockParams, ShockTable};
use thiserror::Error;

pub use app::ChartWindow;
pub use chart::{Axis, Chart};
pub use raster::{PngFile, RgbBuffer};
pub use sink::{ChartSink, DisplaySink, NoDisplay};

/// Failures while producing or presenting the chart.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Shock(#[from] ShockError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("chart image {0} is empty after rendering")]
    EmptyOutput(PathBuf),

    #[error("image of {width}x{height} px is too small for the chart")]
    TooSmall { width: u32, height: u32 },

    #[error("display failed: {0}")]
    Display(String),
}

/// Compute the table, build the chart, hand it to `sink`, then to `display`.
///
/// The table is returned so callers can inspect what was plotted.
pub fn run(
    params: &ShockParams,
    sink: &mut dyn ChartSink,
    display: &mut dyn DisplaySink,
) -> Result<ShockTable, RenderError> {
    let table = shock_core::compute(params)?;
    let chart = Chart::from_table(&table, params);
    sink.render(&chart)?;
    display.show(&chart)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shock_core::GasProperties;

    #[derive(Default)]
    struct Recorder {
        charts: Vec<Chart>,
        fail: bool,
    }

    impl ChartSink for Recorder {
        fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::Draw("refused".to_string()));
            }
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    impl DisplaySink for Recorder {
        fn show(&mut self, chart: &Chart) -> Result<(), RenderError> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    #[test]
    fn test_run_renders_then_displays_same_chart() {
        let mut sink = Recorder::default();
        let mut display = Recorder::default();
        let table = run(&ShockParams::default(), &mut sink, &mut display).unwrap();

        assert_eq!(table.len(), 900);
        assert_eq!(sink.charts.len(), 1);
        assert_eq!(display.charts.len(), 1);
        assert_eq!(sink.charts[0], display.charts[0]);
    }

    #[test]
    fn test_run_headless_with_no_display() {
        let mut sink = Recorder::default();
        run(&ShockParams::default(), &mut sink, &mut NoDisplay).unwrap();
        assert_eq!(sink.charts.len(), 1);
    }

    #[test]
    fn test_shock_error_skips_rendering() {
        let params = ShockParams {
            gas: GasProperties {
                gamma: 1.0,
                gas_constant: 8.314462618,
            },
            ..Default::default()
        };
        let mut sink = Recorder::default();
        let mut display = Recorder::default();
        let err = run(&params, &mut sink, &mut display).unwrap_err();

        assert!(matches!(err, RenderError::Shock(ShockError::InvalidGas { .. })));
        assert!(sink.charts.is_empty());
        assert!(display.charts.is_empty());
    }

    #[test]
    fn test_sink_error_skips_display() {
        let mut sink = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut display = Recorder::default();
        let err = run(&ShockParams::default(), &mut sink, &mut display).unwrap_err();

        assert!(matches!(err, RenderError::Draw(_)));
        assert!(display.charts.is_empty());
    }
}
