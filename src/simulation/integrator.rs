//! Fixed-step time integrator for the two-body system
//!
//! Classical 4th-order Runge-Kutta, four derivative evaluations per step,
//! no error estimation

use super::error::OrbitError;
use super::forces::Dynamics;
use super::states::State;

/// Advance `state` by exactly `dt` seconds with one RK4 step
/// Returns a new state; the input is left untouched. Errors from the
/// dynamics model are passed through unchanged
pub fn rk4_step<D>(dynamics: &D, state: &State, dt: f64) -> Result<State, OrbitError>
where
    D: Dynamics + ?Sized,
{
    let half_dt = 0.5 * dt;

    // k1 = dt * f(y)
    let k1 = dynamics.derivative(state)?;

    // k2 = dt * f(y + k1/2)
    let k2 = dynamics.derivative(&state.advanced(&k1, half_dt))?;

    // k3 = dt * f(y + k2/2)
    let k3 = dynamics.derivative(&state.advanced(&k2, half_dt))?;

    // k4 = dt * f(y + k3)
    let k4 = dynamics.derivative(&state.advanced(&k3, dt))?;

    // y' = y + (k1 + 2 k2 + 2 k3 + k4) / 6, with dt factored out of the k's
    let slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
    Ok(state.advanced(&slope, dt / 6.0))
}
