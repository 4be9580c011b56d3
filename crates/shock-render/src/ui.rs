// Read-only side panel with the constants behind the chart.

use crate::chart::Chart;

/// Draw the right-side readout panel.
pub fn draw_summary(ctx: &egui::Context, chart: &Chart) {
    egui::SidePanel::right("summary")
        .min_width(200.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Gas & Sampling");
            ui.separator();

            egui::Grid::new("summary_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (name, value) in &chart.summary {
                        ui.label(name.as_str());
                        ui.monospace(value.as_str());
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.label("Left axis");
            ui.monospace(format!(
                "{}  [{}, {}]",
                chart.primary.label, chart.primary.range.min, chart.primary.range.max
            ));
            ui.label("Right axis");
            ui.monospace(format!(
                "{}  [{}, {}]",
                chart.secondary.label, chart.secondary.range.min, chart.secondary.range.max
            ));
        });
}
