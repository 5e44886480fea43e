//! Dynamics model for the integrator
//!
//! Defines the `Dynamics` trait (state -> time derivative) and the
//! inverse-square gravity of a point mass fixed at the origin

use crate::simulation::error::OrbitError;
use crate::simulation::params::PhysicalConstants;
use crate::simulation::states::{Derivative, State};

/// Source of the equations of motion `dy/dt = f(y)`
/// The force field is static, so there is no explicit time argument
pub trait Dynamics {
    fn derivative(&self, state: &State) -> Result<Derivative, OrbitError>;
}

/// Newtonian gravity of a central mass fixed at the origin, no softening
#[derive(Debug, Clone, Copy)]
pub struct CentralGravity {
    pub constants: PhysicalConstants,
}

impl CentralGravity {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }
}

impl Dynamics for CentralGravity {
    fn derivative(&self, state: &State) -> Result<Derivative, OrbitError> {
        let r = state.r;

        // |r|, distance to the central mass
        let n = r.norm();
        if n == 0.0 {
            return Err(OrbitError::DegenerateInput { time: None });
        }

        // a = -G M r / |r|^3
        let inv_n3 = (n * n * n).recip();
        let a = -self.constants.mu() * inv_n3 * r;

        Ok(Derivative { v: state.v, a })
    }
}
