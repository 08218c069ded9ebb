use clap::Parser;
use simnet::scenarios::announce::{self, DEFAULT_STOP};
use tracing_subscriber::EnvFilter;

/// Prints a repeating announcement every 3 virtual seconds.
#[derive(Debug, Parser)]
#[command(name = "announce", version)]
struct Args {
    /// The name printed with every announcement.
    #[arg(long, default_value = "")]
    name: String,

    /// The identifier printed with every announcement.
    #[arg(long, default_value = "")]
    number: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let _ = announce::run(args.name, args.number, DEFAULT_STOP);
}
