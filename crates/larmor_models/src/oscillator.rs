use larmor_core::error::{Result, SimError};
use larmor_core::field::PhysicalConstants;
use larmor_core::traits::SourceMotion;
use nalgebra::Vector3;

/// Empirical multiplier applied by the renderer so field arrows are
/// visible at animation scale. Presentation-only: it is not a physical
/// quantity and must never be folded into [`PhysicalConstants`].
pub const VISUAL_FIELD_SCALE: f64 = 1.0e7;

/// A point charge on a spring, oscillating along y with the closed-form
/// solution y(t) = A cos(omega t), omega = sqrt(k/m).
///
/// This is the analytic counterpart to trajectory-backed motion: no ODE is
/// integrated and no numerical error accumulates.
#[derive(Debug, Clone, Copy)]
pub struct OscillatingCharge {
    amplitude: f64,
    omega: f64,
}

impl OscillatingCharge {
    pub fn new(constants: &PhysicalConstants, amplitude: f64) -> Result<Self> {
        if !amplitude.is_finite() {
            return Err(SimError::InvalidParameter {
                component: "OscillatingCharge::new",
                parameter: "amplitude",
                reason: format!("must be finite, got {amplitude}"),
            });
        }
        Ok(Self {
            amplitude,
            omega: constants.omega(),
        })
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// The constant acceleration amplitude -A omega^2 along y; the actual
    /// acceleration is this vector scaled by cos(omega t).
    pub fn acceleration_amplitude(&self) -> Vector3<f64> {
        Vector3::new(0.0, -self.amplitude * self.omega * self.omega, 0.0)
    }
}

impl SourceMotion for OscillatingCharge {
    fn position(&self, t: f64) -> Vector3<f64> {
        Vector3::new(0.0, self.amplitude * (self.omega * t).cos(), 0.0)
    }

    fn acceleration(&self, t: f64) -> Vector3<f64> {
        self.acceleration_amplitude() * (self.omega * t).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::OscillatingCharge;
    use larmor_core::field::PhysicalConstants;
    use larmor_core::traits::SourceMotion;

    fn constants() -> PhysicalConstants {
        // k/m = 9 so omega = 3.
        PhysicalConstants::new(1.0, 1.0, 100.0, 2.0, 18.0).expect("constants are valid")
    }

    #[test]
    fn omega_comes_from_the_spring() {
        let charge = OscillatingCharge::new(&constants(), 0.5).expect("valid");
        assert!((charge.omega() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn position_and_acceleration_follow_the_closed_form() {
        let amplitude = 0.5;
        let charge = OscillatingCharge::new(&constants(), amplitude).expect("valid");
        for &t in &[0.0_f64, 0.3, 1.7, -2.2] {
            let phase = (3.0 * t).cos();
            let position = charge.position(t);
            let acceleration = charge.acceleration(t);
            assert!((position.y - amplitude * phase).abs() < 1e-12);
            assert!((acceleration.y + amplitude * 9.0 * phase).abs() < 1e-12);
            assert_eq!(position.x, 0.0);
            assert_eq!(position.z, 0.0);
        }
    }

    #[test]
    fn acceleration_is_the_amplitude_scaled_by_phase() {
        let charge = OscillatingCharge::new(&constants(), 1.0).expect("valid");
        // At t = 0 the phase factor is exactly 1.
        assert_eq!(charge.acceleration(0.0), charge.acceleration_amplitude());
    }

    #[test]
    fn rejects_non_finite_amplitude() {
        let err = OscillatingCharge::new(&constants(), f64::NAN)
            .expect_err("expected amplitude error");
        assert!(format!("{err}").contains("amplitude"));
    }
}
