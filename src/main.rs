use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stimkit::models::{AppConfig, RunReport, CONFIG_ENV};
use stimkit::services::{
    run_pipeline, BatchOrchestrator, CancelToken, Inverter, PipelineDirs, ScrambleService,
};

/// Exit status for configuration errors, distinct from per-file failures.
const EXIT_CONFIG: u8 = 2;

#[derive(Parser)]
#[command(name = "stimkit")]
#[command(about = "Diffeomorphic scrambling and chrominance rotation for visual stimuli")]
struct Cli {
    /// YAML config file (defaults to $STIMKIT_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write a JSON run report to this path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble every image in a directory
    Scramble {
        /// Directory of PNG/JPEG inputs
        input: PathBuf,
        /// Output directory (created if absent)
        output: PathBuf,
    },
    /// Rotate chrominance of every image and write 180° foils
    Rotate {
        input: PathBuf,
        /// Directory for rotated targets
        rotated: PathBuf,
        /// Directory for foils
        foil: PathBuf,
    },
    /// Write the 180° chrominance inversion of every image
    Invert { input: PathBuf, output: PathBuf },
    /// Scramble, then rotate: <workdir>/{scrambled,rotated,foil}
    Pipeline { input: PathBuf, workdir: PathBuf },
    /// Print the effective configuration as YAML
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        run_status_command();
        return ExitCode::SUCCESS;
    };

    let config = match load_config(cli.config.as_deref(), cli.seed) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let report = match run_command(command, &config) {
        Ok(Some(report)) => report,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &cli.report {
        if let Err(e) = write_report(&report, path) {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        cancelled = report.cancelled,
        "Done"
    );
    if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "stimkit=debug" } else { "stimkit=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(path).context("Failed to load configuration")?;
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate().context("Invalid configuration")?;
    tracing::debug!(?config, "Effective configuration");
    Ok(config)
}

fn make_rng(config: &AppConfig) -> StdRng {
    match config.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Run one subcommand. `None` means the command produces no report.
fn run_command(command: Commands, config: &AppConfig) -> anyhow::Result<Option<RunReport>> {
    let cancel = CancelToken::new();
    if let Err(e) = cancel.cancel_on_interrupt() {
        tracing::warn!(error = %e, "Could not install interrupt handler");
    }
    let mut rng = make_rng(config);

    let report = match command {
        Commands::Scramble { input, output } => {
            let service = ScrambleService::from_config(config)?;
            service
                .run(&input, &output, &mut rng, &cancel)
                .with_context(|| format!("Failed to scramble {}", input.display()))?
        }
        Commands::Rotate {
            input,
            rotated,
            foil,
        } => {
            let mut orchestrator = BatchOrchestrator::from_config(config)?;
            orchestrator
                .run(&input, &rotated, &foil, &mut rng, &cancel)
                .with_context(|| format!("Failed to rotate {}", input.display()))?
        }
        Commands::Invert { input, output } => Inverter::from_config(config)
            .run(&input, &output, &cancel)
            .with_context(|| format!("Failed to invert {}", input.display()))?,
        Commands::Pipeline { input, workdir } => {
            let scrambler = ScrambleService::from_config(config)?;
            let mut orchestrator = BatchOrchestrator::from_config(config)?;
            let dirs = PipelineDirs::under(&workdir);
            run_pipeline(&scrambler, &mut orchestrator, &input, &dirs, &mut rng, &cancel)
                .with_context(|| format!("Pipeline failed for {}", input.display()))?
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
            return Ok(None);
        }
    };
    Ok(Some(report))
}

fn write_report(report: &RunReport, path: &Path) -> anyhow::Result<()> {
    let json = report.to_json().context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote run report");
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("stimkit v{VERSION}");
    println!("Stimulus generation: diffeomorphic scrambling and chrominance rotation\n");

    println!("Environment Variables:");
    let config_source = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string());
    println!("  {CONFIG_ENV:<16} {config_source}");
    println!("  {:<16} log filter, e.g. stimkit=debug", "RUST_LOG");

    println!("\nCommands:");
    println!("  stimkit scramble <input> <output>          Scramble a directory");
    println!("  stimkit rotate <input> <rotated> <foil>    Rotate with foils");
    println!("  stimkit invert <input> <output>            180° inversion only");
    println!("  stimkit pipeline <input> <workdir>         Scramble, then rotate");
    println!("  stimkit config                             Print effective config");
    println!("\nRun 'stimkit --help' for more details.");
}
