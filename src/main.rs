//! Mitosim - command-line entry point
//!
//! Builds one of the shipped cell-cycle nets, runs it to the configured
//! target time and reports the final marking; optionally writes the full
//! recording as CSV or JSON.

use clap::Parser;
use std::path::PathBuf;

use mitosim::core::config::SimSettings;
use mitosim::core::error::{Result, SimError};
use mitosim::core::units::hours;
use mitosim::model::{mammalian_cycle, simple_cycle, GrowthCase, ParameterSet};
use mitosim::sim::Simulation;

#[derive(Parser, Debug)]
#[command(name = "mitosim")]
#[command(about = "Simulate eukaryotic cell-cycle regulation as a hybrid Petri net")]
struct Args {
    /// Model to run: "mammalian" or "simple"
    #[arg(long, default_value = "mammalian")]
    model: String,

    /// Growth case of the generic model (1: 24 h mass doubling, 2: 14 h)
    #[arg(long, default_value_t = 1)]
    case: u8,

    /// Simulated time span in hours
    #[arg(long, default_value_t = 96.0)]
    hours: f64,

    /// Coarse step size in seconds
    #[arg(long, default_value_t = 5.0)]
    step: f64,

    /// Sampling interval in seconds
    #[arg(long, default_value_t = 300.0)]
    sampling: f64,

    /// TOML settings file; takes precedence over the timing flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the recording as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the recording as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("mitosim=info")
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => SimSettings::from_toml_file(path)?,
        None => SimSettings::new(hours(args.hours), args.step, args.sampling),
    };
    settings.validate()?;

    let case = match args.case {
        1 => GrowthCase::Case1,
        2 => GrowthCase::Case2,
        other => {
            return Err(SimError::Config(format!(
                "unknown growth case {other}, expected 1 or 2"
            )))
        }
    };

    let mut simulation = match args.model.as_str() {
        "mammalian" => {
            let params = ParameterSet::mammalian();
            mammalian_cycle(&params, case)?.net.simulation(settings)?
        }
        "simple" => simple_cycle()?.net.simulation(settings)?,
        other => return Err(SimError::Config(format!("unknown model '{other}'"))),
    };

    tracing::info!(
        model = %args.model,
        target_time = settings.target_time,
        step = settings.step,
        "starting simulation"
    );
    simulation.run()?;
    tracing::info!(
        ticks = simulation.ticks(),
        samples = simulation.recording().len(),
        "simulation complete"
    );

    report(&simulation);

    if let Some(path) = &args.csv {
        let mut file = std::fs::File::create(path)?;
        simulation.recording().write_csv(&mut file)?;
        tracing::info!(path = %path.display(), "CSV recording written");
    }
    if let Some(path) = &args.json {
        std::fs::write(path, simulation.recording().to_json()?)?;
        tracing::info!(path = %path.display(), "JSON recording written");
    }

    Ok(())
}

fn report(simulation: &Simulation) {
    println!(
        "\n=== final marking at t = {} s ===",
        simulation.elapsed_time()
    );
    let mut entries: Vec<(String, f64)> = simulation.current_marking().into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in entries {
        println!("{name:>16}  {value:.6}");
    }
}
