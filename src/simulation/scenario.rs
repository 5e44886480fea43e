//! Build a fully-initialized run from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) plus the initial conditions and
//! produces the runtime bundle `Scenario` containing:
//! - physical constants (`PhysicalConstants`)
//! - run parameters (`RunParameters`)
//! - the initial state of the orbiting body (`State`)
//! - output and viewer settings, passed through untouched

use crate::configuration::config::{InitialConfig, OutputConfig, ScenarioConfig, VisualizationConfig};
use crate::simulation::engine::TrajectoryDriver;
use crate::simulation::error::OrbitError;
use crate::simulation::params::{PhysicalConstants, RunParameters};
use crate::simulation::states::{State, Trajectory};

/// Runtime bundle for one integration run
#[derive(Debug, Clone)]
pub struct Scenario {
    pub constants: PhysicalConstants,
    pub parameters: RunParameters,
    pub initial: State,
    pub output: OutputConfig,
    pub visualization: VisualizationConfig,
}

impl Scenario {
    /// `initial` replaces whatever `cfg.initial` holds, so the caller decides
    /// between the file and the terminal
    pub fn build_scenario(cfg: ScenarioConfig, initial: InitialConfig) -> Self {
        let constants = PhysicalConstants::new(cfg.constants.g, cfg.constants.central_mass);

        let state = State::new(initial.x[0], initial.x[1], initial.v[0], initial.v[1]);

        let parameters = RunParameters {
            t0: initial.t0,
            duration: cfg.run.duration,
            dt: cfg.run.dt,
        };

        Self {
            constants,
            parameters,
            initial: state,
            output: cfg.output,
            visualization: cfg.visualization,
        }
    }

    pub fn driver(&self) -> TrajectoryDriver {
        TrajectoryDriver::new(self.constants, self.initial, self.parameters.t0)
    }

    pub fn run(&self) -> Result<Trajectory, OrbitError> {
        self.driver().run_with(&self.parameters)
    }
}
