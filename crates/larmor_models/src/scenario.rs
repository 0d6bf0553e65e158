use crate::oscillator::OscillatingCharge;
use crate::pendulum::DoublePendulum;
use anyhow::{Context, Result};
use larmor_core::field::{FieldTable, PhysicalConstants, RetardedFieldSampler};
use larmor_core::grid::{GridSpec, ObservationGrid};
use larmor_core::trajectory::{run_trajectory, Trajectory};

/// End-to-end setup for the radiating point-charge simulation: generate the
/// observation grid, build the closed-form source, and sample the retarded
/// field at every instant. The returned grid and table are matched by
/// point index; the renderer draws one arrow per grid point per frame.
pub fn radiating_charge_scenario(
    constants: PhysicalConstants,
    amplitude: f64,
    grid_spec: GridSpec,
    times: &[f64],
) -> Result<(ObservationGrid, FieldTable)> {
    let grid = grid_spec
        .generate()
        .context("failed to generate the observation grid")?;
    let charge = OscillatingCharge::new(&constants, amplitude)
        .context("failed to build the oscillating charge")?;
    let table = RetardedFieldSampler::new(constants)
        .evaluate(&grid, &charge, times)
        .context("retarded-field evaluation failed")?;
    log::info!(
        "radiating-charge scenario complete: {} points x {} steps",
        table.points(),
        table.steps()
    );
    Ok((grid, table))
}

/// End-to-end setup for the double-pendulum simulation: integrate the
/// released pendulum for `steps` fixed steps of size `dt`. The renderer
/// reads (theta1, theta2) per entry to place the bobs each frame.
pub fn double_pendulum_scenario(
    pendulum: DoublePendulum,
    initial_state: [f64; 4],
    dt: f64,
    steps: usize,
) -> Result<Trajectory> {
    let trajectory = run_trajectory(&pendulum, &initial_state, 0.0, dt, steps)
        .context("double-pendulum integration failed")?;
    log::info!("double-pendulum scenario complete: {} entries", trajectory.len());
    Ok(trajectory)
}
