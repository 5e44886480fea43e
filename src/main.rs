use orbsim::{ScenarioConfig, Scenario, Trajectory};
use orbsim::{prompt_initial_conditions, save_table, NumberFormat};
use orbsim::{bench_convergence, bench_rk4_step, max_energy_drift};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML, as a path or a name under `scenarios/`
    #[arg(short, default_value = "leo.yaml")]
    file_name: String,

    /// Ask for the initial conditions even if the scenario has them
    #[arg(short, long)]
    interactive: bool,

    /// Skip the viewer
    #[arg(long)]
    no_plot: bool,

    /// Print the energy-convergence table and RK4 step timings
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn write_outputs(scenario: &Scenario, trajectory: &Trajectory) -> Result<()> {
    if let Some(path) = &scenario.output.table {
        save_table(path, trajectory, NumberFormat::Scientific)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &scenario.output.dynamic_table {
        save_table(path, trajectory, NumberFormat::Plain)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(scenario: &Scenario, trajectory: &Trajectory) -> Result<()> {
    let p = &scenario.parameters;
    let (r_min, r_max) = trajectory
        .iter()
        .map(|s| s.radius())
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), r| (lo.min(r), hi.max(r)));
    let drift = max_energy_drift(&scenario.constants, &scenario.initial, p.t0, p.duration, p.dt)?;
    let e0 = scenario.initial.specific_energy(scenario.constants.mu());

    println!(
        "{} samples, dt = {} s, t = [{}, {}) s",
        trajectory.len(),
        p.dt,
        p.t0,
        p.t0 + p.duration
    );
    println!("radius range: {r_min:.6e} .. {r_max:.6e} m");
    println!("specific energy: {e0:.6e} J/kg, max drift {drift:.3e} J/kg");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    let initial = match scenario_cfg.initial.take() {
        Some(initial) if !args.interactive => initial,
        _ => prompt_initial_conditions().context("failed to read initial conditions")?,
    };

    let scenario = Scenario::build_scenario(scenario_cfg, initial);
    let trajectory = scenario.run()?;

    write_outputs(&scenario, &trajectory)?;
    print_summary(&scenario, &trajectory)?;

    if args.bench {
        let p = &scenario.parameters;
        bench_convergence(&scenario.constants, &scenario.initial, p.duration, p.dt, 5)?;
        bench_rk4_step(&scenario.constants, &scenario.initial, p.dt)?;
    }

    #[cfg(feature = "viewer")]
    if scenario.visualization.enabled && !args.no_plot {
        orbsim::run_orbit_2d(&trajectory, &scenario.visualization);
    }

    Ok(())
}
