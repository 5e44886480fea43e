pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::states::{State, Derivative, Sample, Trajectory, NVec2};
pub use simulation::params::{PhysicalConstants, RunParameters};
pub use simulation::error::OrbitError;
pub use simulation::forces::{Dynamics, CentralGravity};
pub use simulation::integrator::rk4_step;
pub use simulation::engine::{integrate, run, TrajectoryDriver};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ConstantsConfig, InitialConfig, RunConfig, OutputConfig, VisualizationConfig};
pub use configuration::prompt::{read_initial_conditions, prompt_initial_conditions};

pub use output::table::{write_table, save_table, NumberFormat};

pub use benchmark::convergence::{convergence_study, energy_error, max_energy_drift, bench_convergence, bench_rk4_step};

#[cfg(feature = "viewer")]
pub use visualization::orbit_vis2d::run_orbit_2d;
