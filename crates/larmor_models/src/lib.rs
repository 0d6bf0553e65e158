//! Physical models consumed by the `larmor_core` numerical engine: the
//! double-pendulum equations of motion and the oscillating point-charge
//! closed-form kinematics. The core knows nothing about these systems; it
//! sees only the `Derivatives` and `SourceMotion` contracts.

pub mod oscillator;
pub mod pendulum;
pub mod scenario;
