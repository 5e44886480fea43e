//! Trajectory driver
//!
//! Steps a state from `t0` to `t0 + duration` with a fixed `dt`, sampling
//! `(t, x, y)` once per step. Time is accumulated with `t += dt`, so the
//! final sample can land one step either side of `duration / dt` when the
//! ratio is not exactly representable.

use super::error::OrbitError;
use super::forces::{CentralGravity, Dynamics};
use super::integrator::rk4_step;
use super::params::{PhysicalConstants, RunParameters};
use super::states::{Sample, State, Trajectory};

// Upper bound on the preallocated sample buffer; longer runs just grow it.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;

/// Run the fixed-step loop, calling `observe(t, &state)` once per sample
/// Returns the state after the last step, i.e. the first one at or past
/// `t0 + duration`
pub fn integrate<D, F>(
    dynamics: &D,
    initial: &State,
    t0: f64,
    duration: f64,
    dt: f64,
    mut observe: F,
) -> Result<State, OrbitError>
where
    D: Dynamics + ?Sized,
    F: FnMut(f64, &State),
{
    let t_end = validate(initial, t0, duration, dt)?;

    let mut t = t0;
    let mut state = *initial;

    while t < t_end {
        observe(t, &state);

        let next = rk4_step(dynamics, &state, dt).map_err(|e| e.at_time(t))?;
        if !next.is_finite() {
            return Err(OrbitError::NumericOverflow {
                time: t,
                state: next.components(),
            });
        }

        state = next;
        t += dt;
    }

    Ok(state)
}

/// Integrate from `initial` at `t0` for `duration` seconds and collect
/// one [`Sample`] per step
pub fn run<D>(
    dynamics: &D,
    initial: &State,
    t0: f64,
    duration: f64,
    dt: f64,
) -> Result<Trajectory, OrbitError>
where
    D: Dynamics + ?Sized,
{
    let mut trajectory = Trajectory::with_capacity(dt, expected_samples(duration, dt));

    integrate(dynamics, initial, t0, duration, dt, |t, state| {
        trajectory.push(Sample {
            time: t,
            x: state.r.x,
            y: state.r.y,
        });
    })?;

    Ok(trajectory)
}

/// Central-mass driver with its initial conditions fixed at construction
#[derive(Debug, Clone)]
pub struct TrajectoryDriver {
    pub dynamics: CentralGravity,
    pub initial: State,
    pub t0: f64,
}

impl TrajectoryDriver {
    pub fn new(constants: PhysicalConstants, initial: State, t0: f64) -> Self {
        Self {
            dynamics: CentralGravity::new(constants),
            initial,
            t0,
        }
    }

    pub fn run(&self, duration: f64, dt: f64) -> Result<Trajectory, OrbitError> {
        run(&self.dynamics, &self.initial, self.t0, duration, dt)
    }

    /// Run with `duration` and `dt` taken from `params`; `params.t0` is ignored
    /// in favour of the driver's own start time
    pub fn run_with(&self, params: &RunParameters) -> Result<Trajectory, OrbitError> {
        self.run(params.duration, params.dt)
    }

    /// State after integrating for `duration`, without sampling
    pub fn final_state(&self, duration: f64, dt: f64) -> Result<State, OrbitError> {
        integrate(&self.dynamics, &self.initial, self.t0, duration, dt, |_, _| {})
    }
}

/// Number of samples under exact arithmetic, `ceil(duration / dt)`
pub fn expected_samples(duration: f64, dt: f64) -> usize {
    let n = (duration / dt).ceil();
    if n.is_finite() && n > 0.0 {
        (n as usize).min(MAX_PREALLOCATED_SAMPLES)
    } else {
        0
    }
}

/// Reject parameters before any stepping; returns `t0 + duration`
fn validate(initial: &State, t0: f64, duration: f64, dt: f64) -> Result<f64, OrbitError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(OrbitError::InvalidParameter {
            name: "dt",
            value: dt,
            reason: "step size must be positive and finite",
        });
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(OrbitError::InvalidParameter {
            name: "duration",
            value: duration,
            reason: "duration must be positive and finite",
        });
    }
    if !t0.is_finite() {
        return Err(OrbitError::InvalidParameter {
            name: "t0",
            value: t0,
            reason: "start time must be finite",
        });
    }
    if let Some(bad) = initial.components().into_iter().find(|c| !c.is_finite()) {
        return Err(OrbitError::InvalidParameter {
            name: "initial_state",
            value: bad,
            reason: "initial position and velocity must be finite",
        });
    }

    let t_end = t0 + duration;
    if !t_end.is_finite() {
        return Err(OrbitError::InvalidParameter {
            name: "duration",
            value: duration,
            reason: "t0 + duration overflows",
        });
    }

    // t += dt must move t everywhere in [t0, t_end)
    let widest = t0.abs().max(t_end.abs());
    if widest + dt == widest {
        return Err(OrbitError::InvalidParameter {
            name: "dt",
            value: dt,
            reason: "step size is below the time resolution at this t0 and duration",
        });
    }

    Ok(t_end)
}
