// Dual-axis shock chart via egui_plot.

use egui_plot::{AxisHints, HPlacement, Line, Plot, PlotPoints};

use crate::chart::{Axis, Chart};

const LEGEND_ROW_HEIGHT: f32 = 24.0;

/// Draw the chart in the central panel, legends above and below the plot.
///
/// egui_plot has a single y transform, so secondary series are mapped onto
/// the primary range and the right axis relabels its ticks.
pub fn draw_chart(ctx: &egui::Context, chart: &Chart) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(chart.title.as_str());

        legend_row(ui, chart, Axis::Primary);

        let lines: Vec<Line> = chart
            .series
            .iter()
            .map(|series| {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|&(m1, value)| [m1, chart.to_primary(series.axis, value)])
                    .collect();
                Line::new(points)
                    .name(series.label.as_str())
                    .color(series.color.to_egui())
                    .width(2.0)
            })
            .collect();

        let primary = chart.primary.range;
        let secondary = chart.secondary.range;
        let y_axes = vec![
            AxisHints::new_y().label(chart.primary.label.as_str()),
            AxisHints::new_y()
                .label(chart.secondary.label.as_str())
                .placement(HPlacement::Right)
                .formatter(move |mark, _range| {
                    format!("{:.0}", primary.map_to(&secondary, mark.value))
                }),
        ];

        Plot::new("shock_plot")
            .x_axis_label(chart.x_label.as_str())
            .custom_y_axes(y_axes)
            .include_x(chart.x_range.min)
            .include_x(chart.x_range.max)
            .include_y(primary.min)
            .include_y(primary.max)
            .height((ui.available_height() - LEGEND_ROW_HEIGHT).max(0.0))
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
            });

        legend_row(ui, chart, Axis::Secondary);
    });
}

fn legend_row(ui: &mut egui::Ui, chart: &Chart, axis: Axis) {
    ui.horizontal(|ui| {
        for series in chart.series_on(axis) {
            ui.colored_label(series.color.to_egui(), format!("━ {}", series.label));
            ui.add_space(12.0);
        }
    });
}
