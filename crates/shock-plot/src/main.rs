//! Tabulates the normal-shock relations for γ = 1.2, saves the dual-axis
//! chart to `gamma_1.2.png` in the working directory, then shows it in a
//! window until the window is closed.

use std::error::Error;

use shock_core::ShockParams;
use shock_render::{ChartWindow, PngFile};

const OUTPUT_PATH: &str = "gamma_1.2.png";

fn main() -> Result<(), Box<dyn Error>> {
    let params = ShockParams::default();
    println!(
        "Normal shock: gamma = {}, R = {}, M1 in [{}, {}) step {} ({} samples)",
        params.gas.gamma,
        params.gas.gas_constant,
        params.grid.start,
        params.grid.stop,
        params.grid.step,
        params.grid.len()
    );

    let mut png = PngFile::new(OUTPUT_PATH);
    let mut window = ChartWindow::new("Normal Shock Relations (gamma = 1.2)");

    let table = shock_render::run(&params, &mut png, &mut window)?;
    println!("Done: {} samples plotted.", table.len());
    Ok(())
}
