//! Error types for the integration core.

use std::error::Error;
use std::fmt;

/// Contract violations detected while integrating a trajectory.
///
/// Every variant is fatal for the run it occurs in: the driver stops at the
/// first error and returns no partial trajectory.
#[derive(Clone, Debug, PartialEq)]
pub enum OrbitError {
    /// The body sits exactly on the central mass, so the inverse-square
    /// force is undefined.
    DegenerateInput {
        /// Time of the step that hit the singularity, when known.
        time: Option<f64>,
    },
    /// A driver parameter was rejected before any stepping occurred.
    InvalidParameter {
        /// Parameter name (`dt`, `duration`, `t0`, `initial_state`).
        name: &'static str,
        /// The offending value.
        value: f64,
        /// What the parameter must satisfy.
        reason: &'static str,
    },
    /// A step produced a NaN or infinite state component.
    NumericOverflow {
        /// Time at the start of the failing step.
        time: f64,
        /// The non-finite state, as `[x, y, vx, vy]`.
        state: [f64; 4],
    },
}

impl OrbitError {
    /// Attach the step time to a degenerate-position error.
    pub(crate) fn at_time(self, t: f64) -> Self {
        match self {
            Self::DegenerateInput { time: None } => Self::DegenerateInput { time: Some(t) },
            other => other,
        }
    }
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput { time: Some(t) } => {
                write!(f, "degenerate input: body reached the central mass at t = {t} s")
            }
            Self::DegenerateInput { time: None } => {
                write!(f, "degenerate input: position coincides with the central mass")
            }
            Self::InvalidParameter { name, value, reason } => {
                write!(f, "invalid parameter {name} = {value}: {reason}")
            }
            Self::NumericOverflow { time, state } => {
                write!(f, "numeric overflow in step starting at t = {time} s: state {state:?}")
            }
        }
    }
}

impl Error for OrbitError {}
