//! Numerical core for the Larmor educational physics simulations: a
//! radiating point-charge field visualizer and a double-pendulum chaotic
//! motion integrator.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `Derivatives` (ODE
//!   right-hand sides), `SourceMotion` (closed-form or integrated source
//!   kinematics).
//! - **Solvers**: fixed-step classical RK4.
//! - **Trajectory**: the sequential integration driver and its output.
//! - **Grid / Field**: spherical observation-point generation and the
//!   retarded-field sampling engine.
//!
//! Rendering, animation, and windowing are external collaborators: the core
//! produces index-addressable time series and never draws.

pub mod error;
pub mod field;
pub mod grid;
pub mod kinematics;
pub mod solvers;
pub mod traits;
pub mod trajectory;

pub use error::{Result, SimError};
