mod driver;

use bounce_core::diagnostics::{format_diagnostics, format_parse_error};
use bounce_core::{
    build_simulation_context_from_source, demo_balls, run_scenario, Arena, Params,
    ScenarioError, SimConfig, SimError, Simulation, SimulationContext,
};
use clap::{Parser, Subcommand};
use driver::FrameDriver;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bounce")]
#[command(about = "Bouncing balls in a box, one fixed step at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print its detectors
    Run {
        /// Path to the scenario file
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scenario and print ball states as JSON lines
    Trace {
        /// Path to the scenario file
        file: PathBuf,
        /// Write one frame every N steps
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Run the built-in two-ball layout and print ball states as JSON lines
    Demo {
        #[arg(long, default_value_t = Params::DEMO_WIDTH)]
        width: f64,
        #[arg(long, default_value_t = Params::DEMO_HEIGHT)]
        height: f64,
        #[arg(long, default_value_t = Params::DEMO_DT)]
        dt: f64,
        #[arg(long, default_value_t = 600)]
        steps: usize,
        #[arg(long, default_value_t = 1)]
        every: usize,
        /// Override the gravitational acceleration
        #[arg(long, allow_hyphen_values = true)]
        gravity: Option<f64>,
        /// Override the collision margin
        #[arg(long)]
        margin: Option<f64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file, json } => run_file(&file, json),
        Commands::Trace { file, every } => trace_file(&file, every),
        Commands::Demo {
            width,
            height,
            dt,
            steps,
            every,
            gravity,
            margin,
        } => {
            let mut config = SimConfig::default();
            if let Some(g) = gravity {
                config.gravity = g;
            }
            if let Some(m) = margin {
                config.collision_margin = m;
            }
            run_demo(width, height, dt, steps, every, config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_file(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let result = run_scenario(&source).map_err(|e| describe(e, &source))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for detector in result.detectors {
            println!("{} = {}", detector.name, detector.value);
        }
    }

    Ok(())
}

fn trace_file(file: &Path, every: usize) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let ctx = build_simulation_context_from_source(&source).map_err(|e| describe(e, &source))?;
    FrameDriver::new(ctx, every).run(&mut io::stdout().lock())?;
    Ok(())
}

fn run_demo(
    width: f64,
    height: f64,
    dt: f64,
    steps: usize,
    every: usize,
    config: SimConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::InvalidTimestep(dt).into());
    }
    let arena = Arena::new(width, height)?;
    let simulation = Simulation::with_balls(arena, demo_balls(width, height), config)?;

    let ctx = SimulationContext::from_simulation(simulation, dt, steps);
    FrameDriver::new(ctx, every).run(&mut io::stdout().lock())?;
    Ok(())
}

/// Attach source context to parse and analysis errors
fn describe(error: ScenarioError, source: &str) -> String {
    match &error {
        ScenarioError::Parse(e) => format_parse_error(e, source),
        ScenarioError::Analysis(diagnostics) => format!(
            "scenario has errors:\n{}",
            format_diagnostics(diagnostics, source)
        ),
        _ => error.to_string(),
    }
}
