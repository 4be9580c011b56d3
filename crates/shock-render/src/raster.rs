// Static chart rendering via plotters' bitmap backend.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::{Axis, Chart, LegendPosition, Series};
use crate::sink::ChartSink;
use crate::RenderError;

/// Image size in pixels when none is given.
pub const DEFAULT_SIZE: (u32, u32) = (1024, 768);

const LEGEND_HEIGHT: i32 = 40;
const MIN_PLOT_HEIGHT: i32 = 100;

/// Smallest image height that leaves room for both legend strips and a plot.
pub const MIN_HEIGHT: u32 = (2 * LEGEND_HEIGHT + MIN_PLOT_HEIGHT) as u32;
const LEGEND_SWATCH: i32 = 24;
const FONT: &str = "sans-serif";

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Draw `chart` onto `root`, filling the whole area.
///
/// The area is split into a legend strip above, the plot, and a legend strip
/// below. Primary series are drawn against the left axis, secondary series
/// against the right one.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> Result<(), RenderError> {
    let (width, height) = root.dim_in_pixel();
    if width == 0 || height < MIN_HEIGHT {
        return Err(RenderError::TooSmall { width, height });
    }
    root.fill(&WHITE).map_err(draw_err)?;

    let (top, rest) = root.split_vertically(LEGEND_HEIGHT);
    let (plot_area, bottom) = rest.split_vertically(height as i32 - 2 * LEGEND_HEIGHT);

    let x = chart.x_range.as_range();
    let mut ctx = ChartBuilder::on(&plot_area)
        .caption(chart.title.as_str(), (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x.clone(), chart.primary.range.as_range())
        .map_err(draw_err)?
        .set_secondary_coord(x, chart.secondary.range.as_range());

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.primary.label.as_str())
        .draw()
        .map_err(draw_err)?;
    ctx.configure_secondary_axes()
        .y_desc(chart.secondary.label.as_str())
        .draw()
        .map_err(draw_err)?;

    // plotters pins out-of-range points to the plot edge, so only the
    // in-range runs of each curve are drawn.
    for series in chart.series_on(Axis::Primary) {
        let style = series.color.to_plotters().stroke_width(2);
        for run in series.clipped_runs(&chart.primary.range) {
            ctx.draw_series(LineSeries::new(run, style))
                .map_err(draw_err)?;
        }
    }
    for series in chart.series_on(Axis::Secondary) {
        let style = series.color.to_plotters().stroke_width(2);
        for run in series.clipped_runs(&chart.secondary.range) {
            ctx.draw_secondary_series(LineSeries::new(run, style))
                .map_err(draw_err)?;
        }
    }

    for axis in [Axis::Primary, Axis::Secondary] {
        let strip = match chart.axis(axis).legend {
            LegendPosition::Above => &top,
            LegendPosition::Below => &bottom,
        };
        let entries: Vec<&Series> = chart.series_on(axis).collect();
        draw_legend(strip, &entries)?;
    }

    root.present().map_err(draw_err)
}

/// One row of swatch + label entries, evenly spread across `area`.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[&Series],
) -> Result<(), RenderError> {
    if entries.is_empty() {
        return Ok(());
    }
    let (width, height) = area.dim_in_pixel();
    let slot = width as i32 / entries.len() as i32;
    let y = height as i32 / 2;

    for (i, series) in entries.iter().enumerate() {
        let x = slot * i as i32 + slot / 3;
        let style = series.color.to_plotters().stroke_width(3);
        area.draw(&PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], style))
            .map_err(draw_err)?;
        area.draw(&Text::new(
            series.label.clone(),
            (x + LEGEND_SWATCH + 6, y - 8),
            (FONT, 16).into_font(),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}

/// Writes the chart to a PNG file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct PngFile {
    path: PathBuf,
    size: (u32, u32),
}

impl PngFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSink for PngFile {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
        {
            let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
            draw_chart(&root, chart)?;
        }

        let written = fs::metadata(&self.path)?.len();
        if written == 0 {
            return Err(RenderError::EmptyOutput(self.path.clone()));
        }
        println!("Wrote {} ({written} bytes)", self.path.display());
        Ok(())
    }
}

/// Renders the chart into an in-memory RGB buffer.
#[derive(Debug, Clone)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Vec::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Packed RGB bytes of the last render; empty before the first one.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for RgbBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }
}

impl ChartSink for RgbBuffer {
    fn render(&mut self, chart: &Chart) -> Result<(), RenderError> {
        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            draw_chart(&root, chart)?;
        }
        self.pixels = buffer;
        Ok(())
    }
}
