use crate::chart::Chart;
use crate::RenderError;

/// Destination for the rendered chart image.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError>;
}

/// Presents the chart to a user. Implementations may block.
pub trait DisplaySink {
    fn show(&mut self, chart: &Chart) -> Result<(), RenderError>;
}

/// Display sink for headless runs: does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDisplay;

impl DisplaySink for NoDisplay {
    fn show(&mut self, _chart: &Chart) -> Result<(), RenderError> {
        Ok(())
    }
}
