use thiserror::Error;

/// Error taxonomy for the simulation core.
///
/// Every variant names the component that failed and the input (parameter,
/// point index, or step index) that triggered the failure. Validation
/// happens at construction/generation time wherever feasible; numeric
/// failures discovered mid-loop abort the run immediately.
#[derive(Debug, Error)]
pub enum SimError {
    /// A derivative function produced (or was asked to fill) a vector of a
    /// different length than the state it was given.
    #[error("{component}: dimension mismatch (expected {expected}, got {got})")]
    InvalidDimension {
        component: &'static str,
        expected: usize,
        got: usize,
    },

    /// A configuration parameter is outside its valid domain.
    #[error("{component}: parameter `{parameter}` is invalid: {reason}")]
    InvalidParameter {
        component: &'static str,
        parameter: &'static str,
        reason: String,
    },

    /// A quantity that appears in a denominator is zero.
    #[error("{component}: division by zero: {detail}")]
    DivisionByZero {
        component: &'static str,
        detail: String,
    },

    /// A non-finite value appeared mid-computation (runaway integration,
    /// overflow). The run is aborted rather than clamped.
    #[error("{component}: non-finite value at step {step}, state component {index}")]
    NonFinite {
        component: &'static str,
        step: usize,
        index: usize,
    },

    /// A caller-supplied stop condition fired during a long evaluation.
    #[error("{component}: cancelled after {completed} of {total} observation points")]
    Cancelled {
        component: &'static str,
        completed: usize,
        total: usize,
    },
}

pub type Result<T> = std::result::Result<T, SimError>;
