use crate::error::{Result, SimError};
use crate::traits::SourceMotion;
use crate::trajectory::Trajectory;
use nalgebra::Vector3;

/// Adapts a numerically integrated [`Trajectory`] into a [`SourceMotion`].
///
/// The caller supplies a projection from a raw state vector to the source's
/// (position, acceleration); the adapter handles time lookup with linear
/// interpolation between stored steps and clamping outside the run's span.
/// This is the numerically-integrated counterpart to closed-form
/// kinematics: the field sampler cannot tell them apart.
pub struct TrajectoryMotion<P>
where
    P: Fn(&[f64]) -> (Vector3<f64>, Vector3<f64>),
{
    trajectory: Trajectory,
    project: P,
}

impl<P> TrajectoryMotion<P>
where
    P: Fn(&[f64]) -> (Vector3<f64>, Vector3<f64>),
{
    pub fn new(trajectory: Trajectory, project: P) -> Result<Self> {
        if trajectory.is_empty() {
            return Err(SimError::InvalidParameter {
                component: "TrajectoryMotion::new",
                parameter: "trajectory",
                reason: "must contain at least one entry".into(),
            });
        }
        Ok(Self {
            trajectory,
            project,
        })
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Projected (position, acceleration) at time t, clamped to the
    /// trajectory's time span and lerped between adjacent entries.
    fn sample(&self, t: f64) -> (Vector3<f64>, Vector3<f64>) {
        let last = self.trajectory.len() - 1;
        if t <= self.trajectory.time(0) {
            return (self.project)(self.trajectory.state(0));
        }
        if t >= self.trajectory.time(last) {
            return (self.project)(self.trajectory.state(last));
        }

        // Times advance by a constant step, so the bracketing index is a
        // direct computation rather than a search.
        let dt = self.trajectory.time(1) - self.trajectory.time(0);
        let offset = (t - self.trajectory.time(0)) / dt;
        let lo = (offset.floor() as usize).min(last - 1);
        let hi = lo + 1;
        let frac = (t - self.trajectory.time(lo)) / dt;

        let (p_lo, a_lo) = (self.project)(self.trajectory.state(lo));
        let (p_hi, a_hi) = (self.project)(self.trajectory.state(hi));
        (p_lo.lerp(&p_hi, frac), a_lo.lerp(&a_hi, frac))
    }
}

impl<P> SourceMotion for TrajectoryMotion<P>
where
    P: Fn(&[f64]) -> (Vector3<f64>, Vector3<f64>),
{
    fn position(&self, t: f64) -> Vector3<f64> {
        self.sample(t).0
    }

    fn acceleration(&self, t: f64) -> Vector3<f64> {
        self.sample(t).1
    }
}

#[cfg(test)]
mod tests {
    use super::TrajectoryMotion;
    use crate::traits::{Derivatives, SourceMotion};
    use crate::trajectory::run_trajectory;
    use nalgebra::Vector3;

    /// dS/dt = 2: state grows linearly, so lerp between entries is exact.
    struct Ramp;

    impl Derivatives<f64> for Ramp {
        fn dimension(&self) -> usize {
            1
        }

        fn eval(&self, _t: f64, _state: &[f64], out: &mut [f64]) {
            out[0] = 2.0;
        }
    }

    fn ramp_motion() -> TrajectoryMotion<impl Fn(&[f64]) -> (Vector3<f64>, Vector3<f64>)> {
        let trajectory =
            run_trajectory(&Ramp, &[0.0], 0.0, 0.5, 5).expect("run should succeed");
        TrajectoryMotion::new(trajectory, |state| {
            (Vector3::new(state[0], 0.0, 0.0), Vector3::zeros())
        })
        .expect("trajectory is non-empty")
    }

    #[test]
    fn interpolates_between_stored_steps() {
        let motion = ramp_motion();
        // State at t is exactly 2t; probe off the stored time stamps.
        for &t in &[0.1, 0.6, 1.25, 1.9] {
            let position = motion.position(t);
            assert!(
                (position.x - 2.0 * t).abs() < 1e-12,
                "position {} at t={t}",
                position.x
            );
        }
    }

    #[test]
    fn clamps_outside_the_time_span() {
        let motion = ramp_motion();
        assert_eq!(motion.position(-10.0).x, 0.0);
        assert!((motion.position(100.0).x - 4.0).abs() < 1e-12);
        assert_eq!(motion.acceleration(-10.0), Vector3::zeros());
    }
}
