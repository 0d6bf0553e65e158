use nalgebra::Vector3;
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the integration core.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// The right-hand side of a first-order ODE system dS/dt = f(S, t).
///
/// Implementations are pure: they may be called at any (state, t) within
/// the simulated domain and must write a derivative of the same dimension.
pub trait Derivatives<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates dS/dt.
    /// state: current state
    /// t: current time
    /// out: buffer to write the derivative into (same length as state)
    fn eval(&self, t: T, state: &[T], out: &mut [T]);
}

/// Source motion as seen by the retarded-field sampler.
///
/// Two kinds of implementation exist: closed-form kinematics (evaluated
/// analytically at any t) and trajectory-backed motion (interpolated from a
/// numerically integrated run). The sampler does not distinguish them.
pub trait SourceMotion {
    /// Source position at time t.
    fn position(&self, t: f64) -> Vector3<f64>;

    /// Source acceleration at time t.
    fn acceleration(&self, t: f64) -> Vector3<f64>;
}
