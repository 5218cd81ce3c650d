//! Command-line arguments and the run entry point.

use crate::persistence::save_results_to_csv;
use anyhow::{Context, Result};
use clap::Parser;
use odesim_core::{simulate, RunSettings, SimulationOutput, SolverKind, SystemKind};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "odesim",
    version,
    about = "Differential equations solver for physical systems"
)]
pub struct Args {
    /// Physical system to simulate (double_pendulum, lotka_volterra, heat_equation_1d)
    #[arg(long)]
    pub system: String,

    /// Numerical method to use (euler, runge_kutta, verlet)
    #[arg(long)]
    pub solver: String,

    /// End time of the simulation
    #[arg(long)]
    pub t_end: f64,

    /// Time step
    #[arg(long)]
    pub dt: f64,

    /// Start time
    #[arg(long, default_value = "0.0")]
    pub t0: f64,

    /// Number of grid points for the heat equation
    #[arg(long, default_value = "100")]
    pub heat_points: usize,

    /// Seed for random initial conditions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to save the results (CSV)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn settings(&self) -> RunSettings {
        RunSettings {
            t0: self.t0,
            t_end: self.t_end,
            dt: self.dt,
            heat_points: self.heat_points,
            seed: self.seed,
        }
    }

    fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_level()));
    // A second initialisation (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(args: &Args, out: &mut impl Write) -> Result<SimulationOutput> {
    let system: SystemKind = args.system.parse()?;
    let solver: SolverKind = args.solver.parse()?;
    let output = simulate(system, solver, &args.settings())
        .with_context(|| format!("Failed to simulate {system} with {solver}"))?;

    match &args.output {
        Some(path) => {
            save_results_to_csv(path, &output.labels, &output.trajectory)?;
            info!(path = %path.display(), "results saved");
            writeln!(out, "Results saved to {}", path.display())?;
        }
        None => write_summary(out, &output)?,
    }
    Ok(output)
}

fn write_summary(out: &mut impl Write, output: &SimulationOutput) -> Result<()> {
    writeln!(
        out,
        "{} with {}: {} points",
        output.system,
        output.solver,
        output.trajectory.len()
    )?;
    if let Some((t, state)) = output.trajectory.last() {
        writeln!(out, "final time: {t}")?;
        for (label, value) in output.labels.iter().zip(state) {
            writeln!(out, "  {label} = {value:.6}")?;
        }
    }
    Ok(())
}
