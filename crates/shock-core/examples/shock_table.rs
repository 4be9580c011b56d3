//! Prints the normal-shock relations at a handful of upstream Mach numbers.
//!
//! Run with:
//!   cargo run -p shock-core --example shock_table

use shock_core::{GasProperties, ShockState, StagnationModel};

fn main() -> Result<(), shock_core::ShockError> {
    let gas = GasProperties::default();
    println!("=== Normal shock, gamma = {}, R = {} ===", gas.gamma, gas.gas_constant);
    println!(
        "{:>6} {:>8} {:>9} {:>9} {:>9} {:>11} {:>11}",
        "M1", "M2", "p2/p1", "rho2/rho1", "T2/T1", "legacy p0", "p02/p01"
    );

    for m1 in [1.0, 1.5, 2.0, 3.0, 5.0, 9.99] {
        let legacy = ShockState::evaluate(m1, &gas, StagnationModel::Legacy)?;
        let isentropic = ShockState::evaluate(m1, &gas, StagnationModel::Isentropic)?;
        println!(
            "{:>6.2} {:>8.4} {:>9.4} {:>9.4} {:>9.4} {:>11.4e} {:>11.4}",
            m1,
            legacy.downstream_mach,
            legacy.pressure_ratio,
            legacy.density_ratio,
            legacy.temperature_ratio,
            legacy.stagnation_ratio,
            isentropic.stagnation_ratio,
        );
    }
    Ok(())
}
