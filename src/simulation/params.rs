//! Physical constants and run parameters
//!
//! `PhysicalConstants` holds the gravitational constant and central mass,
//! fixed for a run. `RunParameters` holds the start time, duration and
//! fixed step size handed to the driver.

use std::f64::consts::PI;

/// Gravitational constant, m^3 kg^-1 s^-2
pub const G_SI: f64 = 6.67430e-11;

/// Mass of the Earth, kg
pub const EARTH_MASS: f64 = 5.972e24;

/// Reference run length, 27.3 days in seconds
pub const DEFAULT_DURATION: f64 = 27.3 * 24.0 * 3600.0;

/// Reference step size, one hour
pub const DEFAULT_DT: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub g: f64,            // gravitational constant
    pub central_mass: f64, // mass fixed at the origin
}

impl PhysicalConstants {
    pub fn new(g: f64, central_mass: f64) -> Self {
        Self { g, central_mass }
    }

    /// Gravitational parameter `G * M`
    pub fn mu(&self) -> f64 {
        self.g * self.central_mass
    }

    /// Speed of a circular orbit of radius `r`
    pub fn circular_speed(&self, r: f64) -> f64 {
        (self.mu() / r).sqrt()
    }

    /// Period of an orbit with semi-major axis `a`
    pub fn orbital_period(&self, a: f64) -> f64 {
        2.0 * PI * (a.powi(3) / self.mu()).sqrt()
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::new(G_SI, EARTH_MASS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    pub t0: f64,       // start time
    pub duration: f64, // integrate over [t0, t0 + duration)
    pub dt: f64,       // fixed step size
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            t0: 0.0,
            duration: DEFAULT_DURATION,
            dt: DEFAULT_DT,
        }
    }
}
