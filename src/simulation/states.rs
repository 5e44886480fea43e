//! Core state types for the two-body simulation.
//!
//! Defines the orbiting body's state and its time derivative, both built on
//! `NVec2`, plus the sampled output of a run:
//! - `State` / `Derivative` (position/velocity and velocity/acceleration)
//! - `Sample` / `Trajectory` (time-ordered `(t, x, y)` rows)

use std::ops::{Add, Mul};

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Position and velocity of the orbiting body, metres and metres/second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub r: NVec2, // position
    pub v: NVec2, // velocity
}

impl State {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            r: NVec2::new(x, y),
            v: NVec2::new(vx, vy),
        }
    }

    /// Build from the flat `[x, y, vx, vy]` layout
    pub fn from_components(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Flat `[x, y, vx, vy]` layout
    pub fn components(&self) -> [f64; 4] {
        [self.r.x, self.r.y, self.v.x, self.v.y]
    }

    /// Distance from the central mass
    pub fn radius(&self) -> f64 {
        self.r.norm()
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    /// Specific orbital energy `v^2/2 - mu/|r|`
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.v.dot(&self.v) - mu / self.radius()
    }

    /// z-component of `r x v`
    pub fn specific_angular_momentum(&self) -> f64 {
        self.r.x * self.v.y - self.r.y * self.v.x
    }

    /// `self + h * d`, the partial update used between RK4 stages
    pub fn advanced(&self, d: &Derivative, h: f64) -> Self {
        Self {
            r: self.r + h * d.v,
            v: self.v + h * d.a,
        }
    }
}

/// Time derivative of a [`State`]: velocity and acceleration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivative {
    pub v: NVec2, // dr/dt
    pub a: NVec2, // dv/dt
}

impl Add for Derivative {
    type Output = Derivative;

    fn add(self, rhs: Derivative) -> Derivative {
        Derivative {
            v: self.v + rhs.v,
            a: self.a + rhs.a,
        }
    }
}

impl Mul<f64> for Derivative {
    type Output = Derivative;

    fn mul(self, s: f64) -> Derivative {
        Derivative {
            v: self.v * s,
            a: self.a * s,
        }
    }
}

/// One output row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64, // seconds
    pub x: f64,    // metres
    pub y: f64,    // metres
}

impl Sample {
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Time-ordered samples of a finished run, index 0 at `t0`
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    dt: f64,
}

impl Trajectory {
    pub(crate) fn with_capacity(dt: f64, capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            dt,
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Step size the trajectory was integrated with
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Largest distance from the origin over all samples, 0 if empty
    pub fn max_radius(&self) -> f64 {
        self.samples.iter().map(Sample::radius).fold(0.0, f64::max)
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
