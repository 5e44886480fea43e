use approx::assert_relative_eq;

use orbsim::{CentralGravity, Derivative, Dynamics, NVec2, OrbitError, PhysicalConstants, State};
use orbsim::{rk4_step, run, TrajectoryDriver};
use orbsim::{convergence_study, energy_error};
use orbsim::{InitialConfig, Scenario, ScenarioConfig};

/// Earth-mass central body
pub fn earth() -> PhysicalConstants {
    PhysicalConstants::default()
}

/// Near-circular low Earth orbit at 7000 km
pub fn leo_state() -> State {
    State::new(7.0e6, 0.0, 0.0, 7546.0)
}

/// Exactly circular orbit of radius `r`
pub fn circular_state(c: &PhysicalConstants, r: f64) -> State {
    State::new(r, 0.0, 0.0, c.circular_speed(r))
}

pub fn max_relative_radius_error(trajectory: &orbsim::Trajectory, r0: f64) -> f64 {
    trajectory
        .iter()
        .map(|s| (s.radius() - r0).abs() / r0)
        .fold(0.0, f64::max)
}

/// Uniform field: a = (0, -g), for which RK4 is exact
struct UniformField {
    g: f64,
}

impl Dynamics for UniformField {
    fn derivative(&self, state: &State) -> Result<Derivative, OrbitError> {
        Ok(Derivative { v: state.v, a: NVec2::new(0.0, -self.g) })
    }
}

/// Unit harmonic oscillator: a = -r
struct Spring;

impl Dynamics for Spring {
    fn derivative(&self, state: &State) -> Result<Derivative, OrbitError> {
        Ok(Derivative { v: state.v, a: -state.r })
    }
}

/// Acceleration too large to survive one step
struct Runaway;

impl Dynamics for Runaway {
    fn derivative(&self, state: &State) -> Result<Derivative, OrbitError> {
        Ok(Derivative { v: state.v, a: NVec2::new(1.0e308, 0.0) })
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_points_toward_central_mass() {
    let gravity = CentralGravity::new(earth());
    let s = State::new(7.0e6, -3.0e6, 10.0, 20.0);

    let d = gravity.derivative(&s).unwrap();

    // anti-parallel to r
    assert!(d.a.dot(&s.r) < 0.0, "acceleration is not toward the origin");
    assert!(d.a.perp(&s.r).abs() / (d.a.norm() * s.r.norm()) < 1e-12);
}

#[test]
fn gravity_magnitude_is_mu_over_r_squared() {
    let c = earth();
    let gravity = CentralGravity::new(c);
    let s = State::new(3.0e6, 4.0e6, 0.0, 0.0);

    let d = gravity.derivative(&s).unwrap();

    assert_relative_eq!(d.a.norm(), c.mu() / 25.0e12, max_relative = 1e-12);
}

#[test]
fn gravity_inverse_square_law() {
    let gravity = CentralGravity::new(earth());

    let a_r = gravity.derivative(&State::new(1.0e7, 0.0, 0.0, 0.0)).unwrap().a;
    let a_2r = gravity.derivative(&State::new(2.0e7, 0.0, 0.0, 0.0)).unwrap().a;

    let ratio = a_r.norm() / a_2r.norm();
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
}

#[test]
fn derivative_passes_velocity_through() {
    let gravity = CentralGravity::new(earth());
    let s = State::new(7.0e6, 1.0e6, -12.5, 7546.0);

    let d = gravity.derivative(&s).unwrap();

    assert_eq!(d.v, s.v);
}

#[test]
fn gravity_rejects_body_at_origin() {
    let gravity = CentralGravity::new(earth());
    let s = State::new(0.0, 0.0, 100.0, -50.0);

    assert_eq!(gravity.derivative(&s), Err(OrbitError::DegenerateInput { time: None }));
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_is_exact_for_uniform_field() {
    let field = UniformField { g: 9.81 };
    let s = State::new(0.0, 100.0, 3.0, 20.0);
    let dt = 0.5;

    let next = rk4_step(&field, &s, dt).unwrap();

    // r + v dt + a dt^2 / 2,  v + a dt
    assert_relative_eq!(next.r.x, 1.5, max_relative = 1e-14);
    assert_relative_eq!(next.r.y, 100.0 + 10.0 - 0.5 * 9.81 * 0.25, max_relative = 1e-14);
    assert_relative_eq!(next.v.x, 3.0, max_relative = 1e-14);
    assert_relative_eq!(next.v.y, 20.0 - 9.81 * 0.5, max_relative = 1e-14);
}

#[test]
fn rk4_local_error_is_fifth_order() {
    // x(t) = cos t, v(t) = -sin t
    let s = State::new(1.0, 0.0, 0.0, -1.0);
    let local_error = |dt: f64| {
        let next = rk4_step(&Spring, &s, dt).unwrap();
        (next.r.x - dt.cos()).abs() + (next.v.x + dt.sin()).abs()
    };

    let e1 = local_error(0.1);
    let e2 = local_error(0.05);

    assert!(e1 < 1e-6, "local error too large: {e1}");
    // 2^5 = 32 in the asymptotic regime
    assert!(e1 / e2 > 20.0, "error ratio {} below fifth order", e1 / e2);
}

#[test]
fn rk4_does_not_touch_its_input() {
    let gravity = CentralGravity::new(earth());
    let s = leo_state();
    let copy = s;

    let next = rk4_step(&gravity, &s, 60.0).unwrap();

    assert_eq!(s, copy);
    assert_ne!(next, s);
}

#[test]
fn rk4_step_is_deterministic() {
    let gravity = CentralGravity::new(earth());
    let s = leo_state();

    let a = rk4_step(&gravity, &s, 60.0).unwrap();
    let b = rk4_step(&gravity, &s, 60.0).unwrap();

    assert_eq!(a.components(), b.components());
}

#[test]
fn rk4_propagates_degenerate_position() {
    let gravity = CentralGravity::new(earth());
    let s = State::new(0.0, 0.0, 1.0, 1.0);

    assert_eq!(rk4_step(&gravity, &s, 60.0), Err(OrbitError::DegenerateInput { time: None }));
}

// ==================================================================================
// Driver tests
// ==================================================================================

#[test]
fn leo_end_to_end() {
    let c = earth();
    let trajectory = TrajectoryDriver::new(c, leo_state(), 0.0).run(6000.0, 60.0).unwrap();

    assert!((99..=101).contains(&trajectory.len()), "got {} samples", trajectory.len());

    let first = trajectory.first().unwrap();
    assert_eq!((first.time, first.x, first.y), (0.0, 7.0e6, 0.0));

    let err = max_relative_radius_error(&trajectory, 7.0e6);
    assert!(err < 0.01, "radius deviates by {:.4}%", err * 100.0);
    assert!(trajectory.max_radius() < 7.07e6);
}

#[test]
fn circular_orbit_keeps_its_radius_for_27_days() {
    let c = earth();
    let r0 = 3.844e8;
    let driver = TrajectoryDriver::new(c, circular_state(&c, r0), 0.0);

    let trajectory = driver.run(27.3 * 24.0 * 3600.0, 3600.0).unwrap();

    assert!(max_relative_radius_error(&trajectory, r0) < 0.01);
}

#[test]
fn time_is_strictly_increasing_with_step_spacing() {
    let dt = 60.0;
    let trajectory = run(&CentralGravity::new(earth()), &leo_state(), 1234.5, 6000.0, dt).unwrap();

    assert_eq!(trajectory.dt(), dt);
    for pair in trajectory.samples().windows(2) {
        let step = pair[1].time - pair[0].time;
        assert!(pair[1].time > pair[0].time);
        assert_relative_eq!(step, dt, max_relative = 1e-9);
    }
    let last = trajectory.last().unwrap();
    assert!(last.time < 1234.5 + 6000.0);
}

#[test]
fn accumulated_time_keeps_the_extra_boundary_sample() {
    // ten additions of 0.1 give 0.9999999999999999 < 1.0, so an 11th sample is taken
    let trajectory = run(&CentralGravity::new(earth()), &leo_state(), 0.0, 1.0, 0.1).unwrap();

    assert_eq!(trajectory.len(), 11);
    assert!(trajectory.last().unwrap().time < 1.0);
}

#[test]
fn repeated_runs_are_identical() {
    let driver = TrajectoryDriver::new(earth(), leo_state(), 0.0);

    let a = driver.run(6000.0, 60.0).unwrap();
    let b = driver.run(6000.0, 60.0).unwrap();

    assert_eq!(a, b);
}

#[test]
fn driver_matches_free_function() {
    let c = earth();
    let driver = TrajectoryDriver::new(c, leo_state(), 0.0);

    let a = driver.run(600.0, 60.0).unwrap();
    let b = run(&CentralGravity::new(c), &leo_state(), 0.0, 600.0, 60.0).unwrap();

    assert_eq!(a, b);
}

#[test]
fn final_state_continues_past_last_sample() {
    let c = earth();
    let driver = TrajectoryDriver::new(c, leo_state(), 0.0);

    let trajectory = driver.run(120.0, 60.0).unwrap();
    let end = driver.final_state(120.0, 60.0).unwrap();

    assert_eq!(trajectory.len(), 2);
    let gravity = CentralGravity::new(c);
    let expected = rk4_step(&gravity, &rk4_step(&gravity, &leo_state(), 60.0).unwrap(), 60.0).unwrap();
    assert_eq!(end, expected);
}

#[test]
fn degenerate_start_aborts_whole_run() {
    let driver = TrajectoryDriver::new(earth(), State::new(0.0, 0.0, 0.0, 7546.0), 5.0);

    assert_eq!(driver.run(6000.0, 60.0), Err(OrbitError::DegenerateInput { time: Some(5.0) }));
}

#[test]
fn non_positive_step_is_rejected() {
    let driver = TrajectoryDriver::new(earth(), leo_state(), 0.0);

    for dt in [0.0, -60.0, f64::NAN, f64::INFINITY] {
        match driver.run(6000.0, dt) {
            Err(OrbitError::InvalidParameter { name, .. }) => assert_eq!(name, "dt"),
            other => panic!("dt = {dt} gave {other:?}"),
        }
    }
}

#[test]
fn non_positive_duration_is_rejected() {
    let driver = TrajectoryDriver::new(earth(), leo_state(), 0.0);

    for duration in [0.0, -1.0, f64::NAN] {
        match driver.run(duration, 60.0) {
            Err(OrbitError::InvalidParameter { name, .. }) => assert_eq!(name, "duration"),
            other => panic!("duration = {duration} gave {other:?}"),
        }
    }
}

#[test]
fn unresolvable_step_is_rejected() {
    // at t ~ 1e20 one second is below the f64 spacing, so t += dt would stall
    let driver = TrajectoryDriver::new(earth(), leo_state(), 1.0e20);

    match driver.run(10.0, 1.0) {
        Err(OrbitError::InvalidParameter { name, .. }) => assert_eq!(name, "dt"),
        other => panic!("expected dt rejection, got {other:?}"),
    }
}

#[test]
fn non_finite_initial_state_is_rejected() {
    let driver = TrajectoryDriver::new(earth(), State::new(7.0e6, f64::NAN, 0.0, 7546.0), 0.0);

    match driver.run(600.0, 60.0) {
        Err(OrbitError::InvalidParameter { name, .. }) => assert_eq!(name, "initial_state"),
        other => panic!("expected initial_state rejection, got {other:?}"),
    }
}

#[test]
fn overflow_is_reported_instead_of_propagated() {
    let result = run(&Runaway, &State::new(1.0, 0.0, 0.0, 0.0), 3.0, 100.0, 10.0);

    match result {
        Err(OrbitError::NumericOverflow { time, state }) => {
            assert_eq!(time, 3.0);
            assert!(state.iter().any(|c| !c.is_finite()));
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

#[test]
fn errors_name_the_violated_contract() {
    let msg = OrbitError::DegenerateInput { time: Some(60.0) }.to_string();
    assert!(msg.contains("central mass") && msg.contains("60"));

    let msg = OrbitError::InvalidParameter { name: "dt", value: -1.0, reason: "step size must be positive and finite" }.to_string();
    assert!(msg.contains("dt") && msg.contains("-1"));
}

// ==================================================================================
// Conservation tests
// ==================================================================================

#[test]
fn energy_error_converges_at_fourth_order() {
    let c = earth();
    // mildly eccentric orbit, period ~7100 s
    let s = State::new(7.0e6, 0.0, 0.0, 8000.0);

    let rows = convergence_study(&c, &s, 7200.0, &[60.0, 30.0]).unwrap();
    let order = rows[1].observed_order.unwrap();

    assert!(rows[1].energy_error < rows[0].energy_error);
    assert!(order > 3.0, "observed order {order}");
}

#[test]
fn circular_energy_error_is_small() {
    let c = earth();
    let s = circular_state(&c, 7.0e6);
    let e0 = s.specific_energy(c.mu()).abs();

    let err = energy_error(&c, &s, 6000.0, 60.0).unwrap();

    assert!(err / e0 < 1e-5, "relative energy error {}", err / e0);
}

#[test]
fn angular_momentum_is_nearly_conserved() {
    let c = earth();
    let s = State::new(7.0e6, 0.0, 0.0, 8000.0);
    let h0 = s.specific_angular_momentum();

    let end = TrajectoryDriver::new(c, s, 0.0).final_state(7200.0, 30.0).unwrap();

    assert_relative_eq!(end.specific_angular_momentum(), h0, max_relative = 1e-5);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_from_yaml_runs_leo() {
    let yaml = "run:\n  duration: 6000.0\n  dt: 60.0\n";
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let initial = InitialConfig { x: [7.0e6, 0.0], v: [0.0, 7546.0], t0: 0.0 };

    let scenario = Scenario::build_scenario(cfg, initial);
    let trajectory = scenario.run().unwrap();

    assert_eq!(scenario.parameters.dt, 60.0);
    assert_eq!(scenario.initial, leo_state());
    assert!((99..=101).contains(&trajectory.len()));
}

#[test]
fn scenario_start_time_comes_from_initial_conditions() {
    let cfg = ScenarioConfig::from_yaml_str("run:\n  duration: 120.0\n  dt: 60.0\n").unwrap();
    let initial = InitialConfig { x: [7.0e6, 0.0], v: [0.0, 7546.0], t0: 500.0 };

    let trajectory = Scenario::build_scenario(cfg, initial).run().unwrap();

    assert_eq!(trajectory.first().unwrap().time, 500.0);
    assert_eq!(trajectory.last().unwrap().time, 560.0);
}

// ==================================================================================
// Viewer helpers
// ==================================================================================

#[cfg(feature = "viewer")]
#[test]
fn viewer_scale_fits_orbit_in_window() {
    use orbsim::visualization::orbit_vis2d::{fit_scale, to_screen};

    let trajectory = TrajectoryDriver::new(earth(), leo_state(), 0.0).run(6000.0, 60.0).unwrap();

    let scale = fit_scale(&trajectory, 450.0);
    let points = to_screen(&trajectory, scale);

    assert_eq!(points.len(), trajectory.len());
    let widest = points.iter().map(|p| p.x.abs().max(p.y.abs())).fold(0.0_f32, f32::max);
    assert!((widest - 450.0).abs() < 0.01, "widest point at {widest}");
}
