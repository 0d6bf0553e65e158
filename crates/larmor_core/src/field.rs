use crate::error::{Result, SimError};
use crate::grid::ObservationGrid;
use crate::traits::SourceMotion;
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Immutable bundle of the physical constants a run needs. Computed once at
/// setup and passed explicitly to every component; nothing in the core
/// reads ambient/global configuration.
///
/// Presentation-only factors (e.g. a scale multiplier that makes arrows
/// visible in an animation) do not belong here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub charge: f64,
    pub permittivity: f64,
    pub speed_of_light: f64,
    pub mass: f64,
    pub spring_constant: f64,
}

impl PhysicalConstants {
    pub fn new(
        charge: f64,
        permittivity: f64,
        speed_of_light: f64,
        mass: f64,
        spring_constant: f64,
    ) -> Result<Self> {
        if !charge.is_finite() {
            return Err(invalid_constant("charge", "must be finite"));
        }
        for (name, value) in [
            ("permittivity", permittivity),
            ("speed_of_light", speed_of_light),
            ("mass", mass),
            ("spring_constant", spring_constant),
        ] {
            if value == 0.0 {
                // Each of these ends up in a denominator somewhere
                // (field coefficient, retardation, omega).
                return Err(SimError::DivisionByZero {
                    component: "PhysicalConstants::new",
                    detail: format!("{name} is zero"),
                });
            }
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid_constant(name, "must be positive and finite"));
            }
        }
        Ok(Self {
            charge,
            permittivity,
            speed_of_light,
            mass,
            spring_constant,
        })
    }

    /// Natural angular frequency of the spring-mass source, sqrt(k/m).
    pub fn omega(&self) -> f64 {
        (self.spring_constant / self.mass).sqrt()
    }
}

fn invalid_constant(parameter: &'static str, reason: &str) -> SimError {
    SimError::InvalidParameter {
        component: "PhysicalConstants::new",
        parameter,
        reason: reason.into(),
    }
}

/// Dense table of field samples, one 3-vector per (observation point,
/// time step), stored point-major. Row ordering matches the grid's point
/// order; column ordering matches the sampled instants.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTable {
    points: usize,
    steps: usize,
    values: Vec<Vector3<f64>>,
}

impl FieldTable {
    pub fn points(&self) -> usize {
        self.points
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn get(&self, point: usize, step: usize) -> Vector3<f64> {
        self.values[point * self.steps + step]
    }

    /// All samples for one observation point, in step order.
    pub fn row(&self, point: usize) -> &[Vector3<f64>] {
        &self.values[point * self.steps..(point + 1) * self.steps]
    }
}

/// Evaluates the retarded radiation field of a moving point charge at every
/// observation point and every sampled instant.
///
/// For an observation point r and instant t, the sampler looks up the
/// source acceleration at the retarded time t - |r|/c (a farther point sees
/// the source's earlier state), keeps only the component transverse to the
/// line of sight, and scales by q / (4 pi eps0 c^2 |r|).
///
/// Every (point, step) entry is independent, so evaluation is parallel
/// across points by default; a sequential path exists for determinism
/// checks, and a cancellable path for long grid x step products.
pub struct RetardedFieldSampler {
    constants: PhysicalConstants,
}

impl RetardedFieldSampler {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Parallel evaluation across observation points.
    pub fn evaluate(
        &self,
        grid: &ObservationGrid,
        motion: &(impl SourceMotion + Sync),
        times: &[f64],
    ) -> Result<FieldTable> {
        self.evaluate_inner(grid, motion, times, None, true)
    }

    /// Sequential evaluation; produces exactly the same table as
    /// [`evaluate`](Self::evaluate).
    pub fn evaluate_seq(
        &self,
        grid: &ObservationGrid,
        motion: &(impl SourceMotion + Sync),
        times: &[f64],
    ) -> Result<FieldTable> {
        self.evaluate_inner(grid, motion, times, None, false)
    }

    /// Parallel evaluation with a cooperative stop flag, checked before
    /// each observation-point row. A cancelled run returns
    /// [`SimError::Cancelled`] rather than a partially filled table.
    pub fn evaluate_with_stop(
        &self,
        grid: &ObservationGrid,
        motion: &(impl SourceMotion + Sync),
        times: &[f64],
        stop: &AtomicBool,
    ) -> Result<FieldTable> {
        self.evaluate_inner(grid, motion, times, Some(stop), true)
    }

    fn evaluate_inner(
        &self,
        grid: &ObservationGrid,
        motion: &(impl SourceMotion + Sync),
        times: &[f64],
        stop: Option<&AtomicBool>,
        parallel: bool,
    ) -> Result<FieldTable> {
        if times.is_empty() {
            return Err(SimError::InvalidParameter {
                component: "RetardedFieldSampler::evaluate",
                parameter: "times",
                reason: "must contain at least one instant".into(),
            });
        }
        if grid.is_empty() {
            return Err(SimError::InvalidParameter {
                component: "RetardedFieldSampler::evaluate",
                parameter: "grid",
                reason: "must contain at least one observation point".into(),
            });
        }

        let steps = times.len();
        let total = grid.len();
        log::info!("sampling retarded field: {total} points x {steps} steps");

        let mut values = vec![Vector3::zeros(); total * steps];
        let completed = AtomicUsize::new(0);

        if parallel {
            values
                .par_chunks_mut(steps)
                .zip(grid.points().par_iter())
                .enumerate()
                .try_for_each(|(index, (row, point))| {
                    self.sample_row_guarded(index, *point, motion, times, row, stop, &completed, total)
                })?;
        } else {
            for (index, (row, point)) in
                values.chunks_mut(steps).zip(grid.points().iter()).enumerate()
            {
                self.sample_row_guarded(index, *point, motion, times, row, stop, &completed, total)?;
            }
        }

        Ok(FieldTable {
            points: total,
            steps,
            values,
        })
    }

    fn sample_row_guarded(
        &self,
        index: usize,
        point: Vector3<f64>,
        motion: &impl SourceMotion,
        times: &[f64],
        row: &mut [Vector3<f64>],
        stop: Option<&AtomicBool>,
        completed: &AtomicUsize,
        total: usize,
    ) -> Result<()> {
        if let Some(flag) = stop {
            if flag.load(Ordering::Relaxed) {
                return Err(SimError::Cancelled {
                    component: "RetardedFieldSampler::evaluate",
                    completed: completed.load(Ordering::Relaxed),
                    total,
                });
            }
        }
        self.sample_row(index, point, motion, times, row)?;
        completed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Fills one observation point's row of the table.
    fn sample_row(
        &self,
        index: usize,
        point: Vector3<f64>,
        motion: &impl SourceMotion,
        times: &[f64],
        out: &mut [Vector3<f64>],
    ) -> Result<()> {
        let distance = point.norm();
        // Grid generation already rejects origin points; this guards
        // against tables built from hand-made grids.
        if distance == 0.0 {
            return Err(SimError::DivisionByZero {
                component: "RetardedFieldSampler::evaluate",
                detail: format!("observation point {index} lies at the origin"),
            });
        }

        let c = self.constants.speed_of_light;
        let r_hat = point / distance;
        let coefficient = self.constants.charge
            / (4.0 * PI * self.constants.permittivity * c * c * distance);
        let delay = distance / c;

        for (step, &t) in times.iter().enumerate() {
            let acceleration = motion.acceleration(t - delay);
            let transverse = r_hat * acceleration.dot(&r_hat) - acceleration;
            out[step] = transverse * coefficient;
        }
        Ok(())
    }
}
