use crate::error::{Result, SimError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Parameters for the spherical/radial observation-point pattern.
///
/// Polar angle theta spans [-pi/2, pi/2) in `n_theta` rows, azimuth phi
/// spans [0, 2pi) in `n_phi` columns, and each direction carries
/// `radial_count` points starting at `radial_start` with spacing
/// `radial_step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub n_theta: usize,
    pub n_phi: usize,
    pub radial_count: usize,
    pub radial_start: f64,
    pub radial_step: f64,
}

impl GridSpec {
    /// Generates the observation grid.
    ///
    /// Loops use integer counters (theta_i = -pi/2 + i*pi/n_theta), so the
    /// point count is exactly n_theta * n_phi * radial_count regardless of
    /// floating rounding. Order is deterministic: theta outer, phi middle,
    /// radius inner; downstream consumers match field samples to points by
    /// index, so this order is part of the contract.
    ///
    /// Any parameter set that would place a point at the origin is rejected
    /// here, before any field evaluation can divide by |r| = 0.
    pub fn generate(&self) -> Result<ObservationGrid> {
        if self.n_theta == 0 {
            return Err(invalid_param("n_theta", "must be at least 1"));
        }
        if self.n_phi == 0 {
            return Err(invalid_param("n_phi", "must be at least 1"));
        }
        if self.radial_count == 0 {
            return Err(invalid_param("radial_count", "must be at least 1"));
        }
        if !self.radial_start.is_finite() || self.radial_start < 0.0 {
            return Err(invalid_param(
                "radial_start",
                "must be finite and non-negative",
            ));
        }
        if !self.radial_step.is_finite() || self.radial_step < 0.0 {
            return Err(invalid_param("radial_step", "must be finite and non-negative"));
        }
        if self.radial_step == 0.0 && self.radial_count > 1 {
            return Err(SimError::DivisionByZero {
                component: "GridSpec::generate",
                detail: "radial_step is zero, all radial points would coincide".into(),
            });
        }

        let d_theta = PI / self.n_theta as f64;
        let d_phi = 2.0 * PI / self.n_phi as f64;

        let mut points =
            Vec::with_capacity(self.n_theta * self.n_phi * self.radial_count);
        for i in 0..self.n_theta {
            let theta = -FRAC_PI_2 + i as f64 * d_theta;
            for j in 0..self.n_phi {
                let phi = j as f64 * d_phi;
                let direction = Vector3::new(
                    phi.cos() * theta.cos(),
                    theta.sin(),
                    phi.sin() * theta.cos(),
                );
                for k in 0..self.radial_count {
                    let radius = self.radial_start + k as f64 * self.radial_step;
                    let point = direction * radius;
                    if point.norm() == 0.0 {
                        return Err(SimError::DivisionByZero {
                            component: "GridSpec::generate",
                            detail: format!(
                                "point {} lies at the origin (radius {radius})",
                                points.len()
                            ),
                        });
                    }
                    points.push(point);
                }
            }
        }

        log::debug!("generated observation grid: {} points", points.len());
        Ok(ObservationGrid { points })
    }
}

fn invalid_param(parameter: &'static str, reason: &str) -> SimError {
    SimError::InvalidParameter {
        component: "GridSpec::generate",
        parameter,
        reason: reason.into(),
    }
}

/// Ordered, immutable collection of observation points. A point's identity
/// is its index; iteration order is the generation order.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationGrid {
    points: Vec<Vector3<f64>>,
}

impl ObservationGrid {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Vector3<f64> {
        self.points[index]
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::GridSpec;

    fn assert_err_contains<T: std::fmt::Debug>(result: crate::error::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn point_count_is_exactly_the_product_of_counts() {
        let spec = GridSpec {
            n_theta: 2,
            n_phi: 2,
            radial_count: 30,
            radial_start: 5.0,
            radial_step: 1.5,
        };
        let grid = spec.generate().expect("generate should succeed");
        assert_eq!(grid.len(), 120);
    }

    #[test]
    fn generation_is_deterministic() {
        let spec = GridSpec {
            n_theta: 3,
            n_phi: 4,
            radial_count: 5,
            radial_start: 2.0,
            radial_step: 0.5,
        };
        let a = spec.generate().expect("generate should succeed");
        let b = spec.generate().expect("generate should succeed");
        assert_eq!(a.len(), b.len());
        for i in 0..a.len() {
            assert_eq!(a.point(i), b.point(i));
        }
    }

    #[test]
    fn radii_increase_along_each_direction() {
        let spec = GridSpec {
            n_theta: 1,
            n_phi: 1,
            radial_count: 4,
            radial_start: 1.0,
            radial_step: 2.0,
        };
        let grid = spec.generate().expect("generate should succeed");
        for k in 0..4 {
            let expected = 1.0 + 2.0 * k as f64;
            assert!((grid.point(k).norm() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn origin_point_is_rejected_at_generation_time() {
        let spec = GridSpec {
            n_theta: 2,
            n_phi: 2,
            radial_count: 3,
            radial_start: 0.0,
            radial_step: 1.0,
        };
        assert_err_contains(spec.generate(), "division by zero");
    }

    #[test]
    fn zero_radial_step_is_rejected() {
        let spec = GridSpec {
            n_theta: 1,
            n_phi: 1,
            radial_count: 2,
            radial_start: 1.0,
            radial_step: 0.0,
        };
        assert_err_contains(spec.generate(), "radial_step is zero");
    }

    #[test]
    fn rejects_zero_counts() {
        let base = GridSpec {
            n_theta: 1,
            n_phi: 1,
            radial_count: 1,
            radial_start: 1.0,
            radial_step: 1.0,
        };
        assert_err_contains(GridSpec { n_theta: 0, ..base }.generate(), "n_theta");
        assert_err_contains(GridSpec { n_phi: 0, ..base }.generate(), "n_phi");
        assert_err_contains(
            GridSpec {
                radial_count: 0,
                ..base
            }
            .generate(),
            "radial_count",
        );
    }
}
