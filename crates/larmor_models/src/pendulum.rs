use larmor_core::error::{Result, SimError};
use larmor_core::traits::Derivatives;

/// Planar double pendulum: two point masses on rigid massless rods.
///
/// State vector is (theta1, omega1, theta2, omega2), angles measured from
/// the downward vertical. The equations of motion are the standard
/// Lagrangian form; the system is chaotic for large releases, which is the
/// point of the simulation.
#[derive(Debug, Clone, Copy)]
pub struct DoublePendulum {
    m1: f64,
    m2: f64,
    l1: f64,
    l2: f64,
    g: f64,
}

impl DoublePendulum {
    pub fn new(m1: f64, m2: f64, l1: f64, l2: f64, g: f64) -> Result<Self> {
        for (name, value) in [("m1", m1), ("m2", m2), ("l1", l1), ("l2", l2)] {
            if value == 0.0 {
                // Masses and lengths divide the dynamics coefficients.
                return Err(SimError::DivisionByZero {
                    component: "DoublePendulum::new",
                    detail: format!("{name} is zero"),
                });
            }
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter {
                    component: "DoublePendulum::new",
                    parameter: name,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }
        if !g.is_finite() {
            return Err(SimError::InvalidParameter {
                component: "DoublePendulum::new",
                parameter: "g",
                reason: format!("must be finite, got {g}"),
            });
        }
        Ok(Self { m1, m2, l1, l2, g })
    }

    /// Total mechanical energy (kinetic + potential) of a state. Constant
    /// along exact solutions; its drift measures integration error.
    pub fn mechanical_energy(&self, state: &[f64]) -> f64 {
        let (th1, w1, th2, w2) = (state[0], state[1], state[2], state[3]);
        let v1_sq = self.l1 * self.l1 * w1 * w1;
        let v2_sq = self.l2 * self.l2 * w2 * w2;
        let kinetic = 0.5 * self.m1 * v1_sq
            + 0.5
                * self.m2
                * (v1_sq + v2_sq + 2.0 * self.l1 * self.l2 * w1 * w2 * (th1 - th2).cos());
        let potential = -(self.m1 + self.m2) * self.g * self.l1 * th1.cos()
            - self.m2 * self.g * self.l2 * th2.cos();
        kinetic + potential
    }
}

impl Derivatives<f64> for DoublePendulum {
    fn dimension(&self) -> usize {
        4
    }

    fn eval(&self, _t: f64, state: &[f64], out: &mut [f64]) {
        let (th1, w1, th2, w2) = (state[0], state[1], state[2], state[3]);
        let delta = th1 - th2;
        // Common denominator: 2*m1 + m2 - m2*cos(2*delta), never zero for
        // positive masses.
        let den = 2.0 * self.m1 + self.m2 - self.m2 * (2.0 * delta).cos();

        let alpha1 = (-self.g * (2.0 * self.m1 + self.m2) * th1.sin()
            - self.m2 * self.g * (th1 - 2.0 * th2).sin()
            - 2.0
                * delta.sin()
                * self.m2
                * (w2 * w2 * self.l2 + w1 * w1 * self.l1 * delta.cos()))
            / (self.l1 * den);

        let alpha2 = (2.0
            * delta.sin()
            * (w1 * w1 * self.l1 * (self.m1 + self.m2)
                + self.g * (self.m1 + self.m2) * th1.cos()
                + w2 * w2 * self.l2 * self.m2 * delta.cos()))
            / (self.l2 * den);

        out[0] = w1;
        out[1] = alpha1;
        out[2] = w2;
        out[3] = alpha2;
    }
}
