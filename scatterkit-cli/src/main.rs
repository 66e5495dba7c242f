//! scatterkit command-line interface.
//!
//! Sweeps cross-sections over energy and angle grids and draws sampled
//! collisions, writing CSV to stdout for external plotting.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use clap::{Args, Parser, Subcommand};
use scatterkit_models::{
    generate_events, linspace, logspace, sweep_total_cross_section, CrossSection,
    CrossSectionModel, SampledEvent, ScatterConfig,
};
use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] scatterkit_models::Error),

    #[error("Model error: {0}")]
    Core(#[from] scatterkit_core::Error),
}

/// Inelastic scattering cross-section diagnostics.
#[derive(Parser)]
#[command(name = "scatterkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Model selection shared by every subcommand.
#[derive(Args, Debug)]
struct ModelArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cross-section model (Rudd1991 or Kim1994), overrides the config file
    #[arg(long)]
    calc_type: Option<String>,

    /// Target species (H, He or H2), overrides the config file
    #[arg(long)]
    species: Option<String>,
}

impl ModelArgs {
    fn resolve(&self) -> Result<ScatterConfig> {
        let mut config = match &self.config {
            Some(path) => ScatterConfig::from_file(path)?,
            None => ScatterConfig::default(),
        };
        if let Some(calc_type) = &self.calc_type {
            config.calc_type = calc_type.parse()?;
        }
        if let Some(species) = &self.species {
            config.species = species.parse()?;
        }
        log::debug!("resolved configuration: {config:?}");
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Total cross-section against incident energy
    Total {
        #[command(flatten)]
        model: ModelArgs,

        /// Lowest incident energy (eV)
        #[arg(long, default_value = "20.0")]
        min_energy: f64,

        /// Highest incident energy (eV)
        #[arg(long, default_value = "10000.0")]
        max_energy: f64,

        /// Number of grid points
        #[arg(short, long, default_value = "100")]
        points: usize,

        /// Space the grid logarithmically
        #[arg(long = "log")]
        log_scale: bool,
    },

    /// Single-differential cross-section across the sampling domain
    Sdcs {
        #[command(flatten)]
        model: ModelArgs,

        /// Incident energy (eV)
        #[arg(short, long)]
        energy: f64,

        /// Number of grid points
        #[arg(short, long, default_value = "200")]
        points: usize,
    },

    /// Double-differential cross-section against emission angle
    Ddcs {
        #[command(flatten)]
        model: ModelArgs,

        /// Incident energy (eV)
        #[arg(short, long)]
        energy: f64,

        /// Energy transfer (eV)
        #[arg(short = 'w', long)]
        energy_transfer: f64,

        /// Number of angles between 0 and pi
        #[arg(short, long, default_value = "181")]
        points: usize,
    },

    /// Draw collisions at a fixed incident energy
    Sample {
        #[command(flatten)]
        model: ModelArgs,

        /// Incident energy (eV)
        #[arg(short, long)]
        energy: f64,

        /// Number of collisions
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Generator seed, overrides the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Draw in parallel chunks of this size
        #[arg(long)]
        chunk_size: Option<usize>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Total {
            model,
            min_energy,
            max_energy,
            points,
            log_scale,
        } => {
            let config = model.resolve()?;
            let model = CrossSectionModel::new(config.calc_type, config.species);
            let energies = if log_scale {
                logspace(min_energy, max_energy, points)
            } else {
                linspace(min_energy, max_energy, points)
            };

            writeln!(out, "energy_ev,total_m2")?;
            for (energy, sigma) in energies.iter().zip(sweep_total_cross_section(&model, &energies))
            {
                match sigma {
                    Ok(sigma) => writeln!(out, "{},{:e}", energy, sigma)?,
                    Err(e) => log::warn!("skipping E = {} eV: {}", energy, e),
                }
            }
        }

        Commands::Sdcs {
            model,
            energy,
            points,
        } => {
            let scatter = model.resolve()?.build(energy)?;
            let (lo, hi) = scatter.energy_transfer_domain()?;
            let width = (hi - lo) / points.max(1) as f64;

            writeln!(out, "energy_transfer_ev,sdcs_m2_per_ev")?;
            for i in 0..points {
                let w = lo + (i as f64 + 0.5) * width;
                writeln!(
                    out,
                    "{},{:e}",
                    w,
                    scatter.single_differential_cross_section(w)?
                )?;
            }
        }

        Commands::Ddcs {
            model,
            energy,
            energy_transfer,
            points,
        } => {
            let config = model.resolve()?;
            let model = CrossSectionModel::new(config.calc_type, config.species);

            writeln!(out, "theta_rad,ddcs_m2_per_ev_sr")?;
            for theta in linspace(0.0, std::f64::consts::PI, points) {
                let ddcs = model.double_differential(energy, energy_transfer, theta)?;
                writeln!(out, "{},{:e}", theta, ddcs)?;
            }
        }

        Commands::Sample {
            model,
            energy,
            count,
            seed,
            chunk_size,
        } => {
            let mut config = model.resolve()?;
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }

            let events: Vec<scatterkit_core::Result<SampledEvent>> = match chunk_size {
                Some(chunk_size) => {
                    let energies = vec![energy; count];
                    let seed = config.seed_or_entropy();
                    log::debug!("batch seed {seed}");
                    generate_events(&config, &energies, seed, chunk_size)
                }
                None => {
                    let mut scatter = config.build(energy)?;
                    (0..count).map(|_| scatter.sample_event()).collect()
                }
            };

            writeln!(
                out,
                "energy_transfer_ev,emission_angle_rad,primary_energy_ev,primary_angle_rad"
            )?;
            let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();
            for event in events {
                match event {
                    Ok(event) => writeln!(
                        out,
                        "{},{},{},{}",
                        event.energy_transfer,
                        event.emission_angle,
                        event.primary_energy,
                        event.primary_angle
                    )?,
                    Err(e) => *rejections.entry(rejection_kind(&e)).or_default() += 1,
                }
            }

            let rejected: usize = rejections.values().sum();
            eprintln!("Sampled {} of {} events", count - rejected, count);
            for (kind, n) in &rejections {
                eprintln!("  rejected ({}): {}", kind, n);
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn rejection_kind(error: &scatterkit_core::Error) -> &'static str {
    use scatterkit_core::Error;
    match error {
        Error::UnsupportedModel { .. } => "unsupported model",
        Error::BelowThreshold { .. } => "below threshold",
        Error::DegenerateDistribution(_) => "degenerate distribution",
        Error::NonPhysicalKinematics(_) => "non-physical kinematics",
        Error::ConfigError(_) => "configuration",
    }
}
