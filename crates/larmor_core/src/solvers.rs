use crate::error::{Result, SimError};
use crate::traits::{Derivatives, Scalar};

/// Classic Runge-Kutta 4th order stepper.
///
/// Fixed step, fixed order, no error estimate. The k-buffers are
/// preallocated for one state dimension; the stepper holds no other state,
/// so repeated calls with identical inputs are bit-reproducible.
pub struct Rk4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> Rk4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::from_f64(0.0).unwrap();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            tmp: vec![z; dim],
        }
    }

    pub fn dimension(&self) -> usize {
        self.k1.len()
    }

    /// Advances `state` by one step of size dt, updating `t` in place.
    ///
    /// Local truncation error O(dt^5), global error O(dt^4) for a smooth
    /// derivative function. Fails with `InvalidDimension` when the state or
    /// the system dimension disagrees with the stepper's own.
    pub fn step(
        &mut self,
        system: &impl Derivatives<T>,
        t: &mut T,
        state: &mut [T],
        dt: T,
    ) -> Result<()> {
        if state.len() != self.k1.len() {
            return Err(SimError::InvalidDimension {
                component: "Rk4::step",
                expected: self.k1.len(),
                got: state.len(),
            });
        }
        if system.dimension() != state.len() {
            return Err(SimError::InvalidDimension {
                component: "Rk4::step",
                expected: state.len(),
                got: system.dimension(),
            });
        }

        let half = T::from_f64(0.5).unwrap();
        let sixth = T::from_f64(1.0 / 6.0).unwrap();
        let two = T::from_f64(2.0).unwrap();

        let t0 = *t;

        // k1 = f(t, y)
        system.eval(t0, state, &mut self.k1);

        // k2 = f(t + dt/2, y + dt*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k1[i] * half;
        }
        system.eval(t0 + dt * half, &self.tmp, &mut self.k2);

        // k3 = f(t + dt/2, y + dt*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k2[i] * half;
        }
        system.eval(t0 + dt * half, &self.tmp, &mut self.k3);

        // k4 = f(t + dt, y + dt*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        system.eval(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for i in 0..state.len() {
            state[i] = state[i]
                + dt * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
        Ok(())
    }
}
