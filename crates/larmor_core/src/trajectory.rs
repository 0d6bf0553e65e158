use crate::error::{Result, SimError};
use crate::solvers::Rk4;
use crate::traits::Derivatives;
use serde::Serialize;

/// An integrated run: `steps` states of dimension `dim`, stored row-major,
/// with the time stamp of each entry. Entry 0 is the initial state.
///
/// Immutable once produced; consumers (field sampler, renderer) read it by
/// index and never write back.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    dim: usize,
    times: Vec<f64>,
    states: Vec<f64>,
}

impl Trajectory {
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Dimension of each state vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Time stamp of entry n.
    pub fn time(&self, n: usize) -> f64 {
        self.times[n]
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// State vector of entry n.
    pub fn state(&self, n: usize) -> &[f64] {
        &self.states[n * self.dim..(n + 1) * self.dim]
    }

    /// Iterates over (time, state) pairs in simulation order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.times
            .iter()
            .copied()
            .zip(self.states.chunks_exact(self.dim))
    }
}

/// Drives the RK4 stepper for a fixed number of steps.
///
/// Produces exactly `steps` entries; entry 0 is `initial_state` at `t0` and
/// entry n sits at t0 + n*dt (running sum). The loop is inherently
/// sequential: entry n depends on entry n-1. No divergence detection is
/// performed, but a non-finite state aborts the run immediately.
pub fn run_trajectory(
    system: &impl Derivatives<f64>,
    initial_state: &[f64],
    t0: f64,
    dt: f64,
    steps: usize,
) -> Result<Trajectory> {
    let dim = system.dimension();
    if dim == 0 {
        return Err(SimError::InvalidParameter {
            component: "run_trajectory",
            parameter: "system",
            reason: "state dimension must be positive".into(),
        });
    }
    if initial_state.len() != dim {
        return Err(SimError::InvalidDimension {
            component: "run_trajectory",
            expected: dim,
            got: initial_state.len(),
        });
    }
    if steps == 0 {
        return Err(SimError::InvalidParameter {
            component: "run_trajectory",
            parameter: "steps",
            reason: "must be at least 1".into(),
        });
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidParameter {
            component: "run_trajectory",
            parameter: "dt",
            reason: format!("must be positive and finite, got {dt}"),
        });
    }
    if !t0.is_finite() {
        return Err(SimError::InvalidParameter {
            component: "run_trajectory",
            parameter: "t0",
            reason: format!("must be finite, got {t0}"),
        });
    }

    log::debug!("integrating trajectory: dim={dim}, steps={steps}, dt={dt}");

    let mut stepper = Rk4::new(dim);
    let mut state = initial_state.to_vec();
    let mut t = t0;

    let mut times = Vec::with_capacity(steps);
    let mut states = Vec::with_capacity(steps * dim);
    times.push(t);
    states.extend_from_slice(&state);

    for n in 1..steps {
        stepper.step(system, &mut t, &mut state, dt)?;
        for (i, &value) in state.iter().enumerate() {
            if !value.is_finite() {
                return Err(SimError::NonFinite {
                    component: "run_trajectory",
                    step: n,
                    index: i,
                });
            }
        }
        times.push(t);
        states.extend_from_slice(&state);
    }

    Ok(Trajectory { dim, times, states })
}
