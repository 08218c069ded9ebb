use clap::Parser;
use simnet::scenarios::dual_lan::{self, DualLanConfig};
use std::{
    error::Error,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

/// Runs an echo workload over two shared-medium segments bridged by a
/// point-to-point link.
#[derive(Debug, Parser)]
#[command(name = "dual-lan", version)]
struct Args {
    /// The number of extra nodes on the client-side segment.
    #[arg(long = "nCsma1")]
    n_csma1: Option<u32>,

    /// The number of extra nodes on the server-side segment.
    #[arg(long = "nCsma2")]
    n_csma2: Option<u32>,

    /// Whether the echo applications log their activity.
    #[arg(long)]
    verbose: Option<bool>,

    /// Whether packet traces are written after the run.
    #[arg(long)]
    tracing: Option<bool>,

    /// A yaml file providing the base configuration. Explicit flags still
    /// override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load(path: &Path) -> Result<DualLanConfig, Box<dyn Error>> {
    Ok(serde_yml::from_str(&std::fs::read_to_string(path)?)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => DualLanConfig::default(),
    };

    if let Some(n) = args.n_csma1 {
        config.n_csma1 = n;
    }
    if let Some(n) = args.n_csma2 {
        config.n_csma2 = n;
    }
    if let Some(verbose) = args.verbose {
        config.verbose = verbose;
    }
    if let Some(tracing) = args.tracing {
        config.tracing = tracing;
    }

    let default_filter = if config.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let (app, time) = match dual_lan::run(&config) {
        Ok(done) => done,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(trace) = &app.trace {
        match trace.write_to(".") {
            Ok(paths) => {
                for path in paths {
                    tracing::info!(target: "dual_lan", "wrote {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("failed to write trace files: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    tracing::info!(
        target: "dual_lan",
        "simulation ended after {} with {} echos completed",
        time,
        app.log.echoed.len()
    );
    ExitCode::SUCCESS
}
