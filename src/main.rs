use anyhow::Context;
use clap::Parser;
use evolab::config::{ConfigManager, SimulationConfig};
use evolab::data::ResultsSaver;
use evolab::engines::generation::Simulation;
use std::path::PathBuf;

/// Genetic algorithm runner for benchmark cost functions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation config (TOML or JSON). Built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving one timestamped subdirectory per run.
    #[arg(short, long, default_value = "results")]
    results_dir: PathBuf,

    /// RNG seed, overriding the one in the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip writing result files.
    #[arg(long)]
    no_save: bool,

    /// Write the effective configuration as TOML to this path and exit.
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigManager::read_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.general.seed = Some(seed);
    }

    if let Some(path) = &args.dump_config {
        ConfigManager::with_config(config).save_to_file(path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let mut simulation = Simulation::from_config(config)?;
    let report = simulation.run()?;

    println!(
        "{} epochs in {:.3}s",
        report.config.general.epochs_no, report.elapsed_secs
    );
    match report.best_cost {
        Some(cost) => println!("Best cost: {:.6} at {:?}", cost, report.best_solution),
        None => println!("No evaluated units"),
    }

    if !args.no_save {
        let saver = ResultsSaver::new(&args.results_dir)?;
        saver.save_results(&report)?;
        println!("Results saved to {}", saver.simulation_dir().display());
    }

    Ok(())
}
