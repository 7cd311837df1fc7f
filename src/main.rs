//! # SHIELDSIM-RS
//!
//! Command-line front end for the Monte Carlo shielding simulator.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shieldsim_rs::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate an experiment file and print the result summary
    Run {
        /// Experiment description (RON)
        config: PathBuf,
        /// Override the seed from the file
        #[arg(long)]
        seed: Option<u64>,
        /// Override the photon count from the file
        #[arg(long)]
        photons: Option<u64>,
    },
    /// Compare a Monte Carlo run with Beer-Lambert attenuation
    Compare {
        /// Experiment description (RON)
        config: PathBuf,
    },
    /// Estimate the photon count needed for a target relative uncertainty
    Estimate {
        #[arg(long, default_value_t = 0.01)]
        uncertainty: f64,
        #[arg(long, default_value_t = 0.1)]
        transmission: f64,
    },
    /// Grid-search the lightest shield whose attenuated dose stays under a limit
    Optimize {
        /// Experiment description (RON); its layers are the candidate materials
        config: PathBuf,
        /// Thickness range per layer in file order (cm): `a..b[..step]` or `a,b[,n]`
        #[arg(long = "range", required = true)]
        ranges: Vec<String>,
        /// Unshielded dose S
        #[arg(long, default_value_t = 1.0)]
        source: f64,
        /// Dose limit D_max
        #[arg(long)]
        dose_limit: f64,
        /// Shield face area (m²)
        #[arg(long, default_value_t = 1.0)]
        area: f64,
        /// Number of designs to print
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Run { config, seed, photons } => {
            let mut experiment = ExperimentConfig::load(&config)?;
            if let Some(seed) = seed {
                experiment.params.seed = seed;
            }
            if let Some(photons) = photons {
                experiment.params.num_photons = photons;
            }
            log::info!("Loaded {} ({} layers)", config.display(), experiment.layers.len());

            println!("{}", info());
            println!();

            let mut sim = experiment.simulator();
            println!("Shield: {}", sim.shield().describe());
            println!("  Total thickness: {:.3} cm", sim.total_thickness());
            println!("  Source energy: {:.3} MeV", experiment.params.source_energy_mev);
            println!("  Photons: {}", experiment.params.num_photons);
            println!("  Seed: {}", sim.seed());
            println!();

            let start = std::time::Instant::now();
            let result = sim.run_with(&experiment.params)?;
            let elapsed = start.elapsed();

            println!("{}", result.summary());
            println!("Wall-clock time: {:.3} s", elapsed.as_secs_f64());
            println!(
                "Performance: {:.2e} histories/s",
                result.total_photons as f64 / elapsed.as_secs_f64()
            );
        }
        Command::Compare { config } => {
            let experiment = ExperimentConfig::load(&config)?;
            let mut sim = experiment.simulator();
            let comparison = compare_with_analytical(
                &mut sim,
                experiment.params.source_energy_mev,
                experiment.params.num_photons,
            )?;
            println!("{}", comparison.summary());
        }
        Command::Estimate { uncertainty, transmission } => {
            let n = estimate_required_photons(uncertainty, transmission)?;
            println!("Recommended photons: {}", n);
        }
        Command::Optimize { config, ranges, source, dose_limit, area, top } => {
            let experiment = ExperimentConfig::load(&config)?;
            let grids = ranges
                .iter()
                .map(|r| parse_range(r))
                .collect::<Result<Vec<_>>>()?;
            let search = GridSearchConfig {
                source_intensity: source,
                dose_limit,
                area_m2: area,
                top_k: top,
            };

            let candidates = grid_search(&experiment.layers, &grids, &search)?;
            if candidates.is_empty() {
                println!("No combination meets D_max = {}", dose_limit);
            }
            for (rank, candidate) in candidates.iter().enumerate() {
                println!("{:>2}. {}", rank + 1, candidate.summary());
            }
        }
    }

    Ok(())
}
