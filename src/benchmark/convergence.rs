use std::time::Instant;

use crate::simulation::engine::integrate;
use crate::simulation::error::OrbitError;
use crate::simulation::forces::CentralGravity;
use crate::simulation::integrator::rk4_step;
use crate::simulation::params::PhysicalConstants;
use crate::simulation::states::State;

/// One row of an energy-convergence study
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRow {
    pub dt: f64,
    pub energy_error: f64,          // |E(end) - E(t0)|, J/kg
    pub observed_order: Option<f64>, // log2 of the error ratio to the previous row
}

/// Absolute specific-energy error after integrating `initial` for `duration`
pub fn energy_error(constants: &PhysicalConstants, initial: &State, duration: f64, dt: f64) -> Result<f64, OrbitError> {
    let gravity = CentralGravity::new(*constants);
    let mu = constants.mu();

    let e0 = initial.specific_energy(mu);
    let end = integrate(&gravity, initial, 0.0, duration, dt, |_, _| {})?;

    Ok((end.specific_energy(mu) - e0).abs())
}

/// Largest specific-energy deviation over every sampled state of a run
pub fn max_energy_drift(constants: &PhysicalConstants, initial: &State, t0: f64, duration: f64, dt: f64) -> Result<f64, OrbitError> {
    let gravity = CentralGravity::new(*constants);
    let mu = constants.mu();

    let e0 = initial.specific_energy(mu);
    let mut worst = 0.0_f64;
    let end = integrate(&gravity, initial, t0, duration, dt, |_, s| {
        worst = worst.max((s.specific_energy(mu) - e0).abs());
    })?;

    Ok(worst.max((end.specific_energy(mu) - e0).abs()))
}

/// Energy error for each step size in `dts`, with the observed order of
/// convergence between consecutive rows
/// Pass step sizes that divide `duration` so every run ends at the same time
pub fn convergence_study(constants: &PhysicalConstants, initial: &State, duration: f64, dts: &[f64]) -> Result<Vec<ConvergenceRow>, OrbitError> {
    let mut rows: Vec<ConvergenceRow> = Vec::with_capacity(dts.len());

    for &dt in dts {
        let err = energy_error(constants, initial, duration, dt)?;
        let observed_order = rows.last().map(|prev| observed_order(prev.dt, prev.energy_error, dt, err));
        rows.push(ConvergenceRow {
            dt,
            energy_error: err,
            observed_order,
        });
    }

    Ok(rows)
}

/// `log(e1/e2) / log(dt1/dt2)`
pub fn observed_order(dt1: f64, e1: f64, dt2: f64, e2: f64) -> f64 {
    (e1 / e2).ln() / (dt1 / dt2).ln()
}

/// Print a convergence table as CSV, halving `dt` `levels` times
/// Paste output directly into a spreadsheet to graph
pub fn bench_convergence(constants: &PhysicalConstants, initial: &State, duration: f64, dt: f64, levels: usize) -> Result<(), OrbitError> {
    let dts: Vec<f64> = (0..levels).map(|i| dt / 2f64.powi(i as i32)).collect();
    let rows = convergence_study(constants, initial, duration, &dts)?;

    println!("dt,energy_error,observed_order");
    for row in rows {
        match row.observed_order {
            Some(p) => println!("{},{:.6e},{:.3}", row.dt, row.energy_error, p),
            None => println!("{},{:.6e},", row.dt, row.energy_error),
        }
    }
    Ok(())
}

/// Time raw RK4 steps on `initial`
pub fn bench_rk4_step(constants: &PhysicalConstants, initial: &State, dt: f64) -> Result<(), OrbitError> {
    let gravity = CentralGravity::new(*constants);
    let counts = [1_000, 10_000, 100_000];

    for steps in counts {
        let mut state = *initial;

        // Warm up
        rk4_step(&gravity, &state, dt)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            state = rk4_step(&gravity, &state, dt)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("steps = {steps:7}, rk4 step = {:10.3} ns, final r = {:.6e} m", per_step * 1e9, state.radius());
    }
    Ok(())
}
