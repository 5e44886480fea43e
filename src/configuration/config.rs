//! Configuration types for loading orbit scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ConstantsConfig`]      – gravitational constant and central mass
//! - [`InitialConfig`]        – initial position, velocity and start time
//! - [`RunConfig`]            – duration and fixed step size
//! - [`OutputConfig`]         – where the text tables are written
//! - [`VisualizationConfig`]  – viewer switch, asset locations, animation speed
//! - [`ScenarioConfig`]       – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `initial` has defaults; when `initial` is missing the
//! binary asks for it on the terminal.
//!
//! # YAML format
//!
//! ```yaml
//! constants:
//!   G: 6.67430e-11          # gravitational constant, m^3 kg^-1 s^-2
//!   M: 5.972e24             # central mass, kg
//!
//! initial:
//!   x: [7.0e6, 0.0]         # position, m
//!   v: [0.0, 7546.0]        # velocity, m/s
//!   t0: 0.0                 # start time, s
//!
//! run:
//!   duration: 6000.0        # s
//!   dt: 60.0                # s
//!
//! output:
//!   table: orbit_output.txt
//!   dynamic_table: orbit_output_dynamic.txt
//!
//! visualization:
//!   enabled: true
//!   assets_dir: assets      # handed to bevy's asset loader
//!   central_image: earth.png
//!   body_image: sat.png
//!   central_zoom: 0.1
//!   body_zoom: 0.02
//!   frame_interval_ms: 50
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT, DEFAULT_DURATION, EARTH_MASS, G_SI};

/// Physical constants for the run
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConstantsConfig {
    #[serde(rename = "G", alias = "g")]
    pub g: f64, // gravitational constant
    #[serde(rename = "M", alias = "central_mass")]
    pub central_mass: f64, // mass of the central body
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            g: G_SI,
            central_mass: EARTH_MASS,
        }
    }
}

/// Initial state of the orbiting body
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct InitialConfig {
    pub x: [f64; 2], // position (x, y), m
    pub v: [f64; 2], // velocity (vx, vy), m/s
    #[serde(default)]
    pub t0: f64, // start time, s
}

/// Integration span and step
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub duration: f64, // total integration time, s
    pub dt: f64,       // fixed step size, s
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            dt: DEFAULT_DT,
        }
    }
}

/// Destination files for the sampled trajectory
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub table: Option<PathBuf>,         // scientific-notation table
    pub dynamic_table: Option<PathBuf>, // plain-decimal table
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: Some(PathBuf::from("orbit_output.txt")),
            dynamic_table: Some(PathBuf::from("orbit_output_dynamic.txt")),
        }
    }
}

/// Viewer settings; image names are resolved inside `assets_dir`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VisualizationConfig {
    pub enabled: bool,
    pub assets_dir: PathBuf,
    pub central_image: Option<String>, // drawn at the origin, circle if absent
    pub body_image: Option<String>,    // drawn at the current sample, circle if absent
    pub central_zoom: f32,             // sprite scale for `central_image`
    pub body_zoom: f32,                // sprite scale for `body_image`
    pub frame_interval_ms: u64,        // time between animation frames
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            assets_dir: PathBuf::from("assets"),
            central_image: None,
            body_image: None,
            central_zoom: 0.1,
            body_zoom: 0.02,
            frame_interval_ms: 50,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub constants: ConstantsConfig, // G and M
    #[serde(default)]
    pub initial: Option<InitialConfig>, // prompted for when absent
    #[serde(default)]
    pub run: RunConfig, // duration and dt
    #[serde(default)]
    pub output: OutputConfig, // text tables
    #[serde(default)]
    pub visualization: VisualizationConfig, // bevy viewer
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
