mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::serve::ServeArgs;

#[derive(Parser)]
#[command(
    name = "adservice",
    about = "Ad service — category-targeted ads with random fallback and flag-gated failure injection",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP ad service (default)
    Serve(ServeArgs),

    /// Print the built-in ad catalog
    Catalog,

    /// Run ad selection locally against the built-in catalog
    Select {
        /// Context keys (categories); omit for an untargeted request
        keys: Vec<String>,

        /// Seed the random fallback for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        None | Some(Commands::Serve(_)) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        None => cmd::serve::run(ServeArgs::default()),
        Some(Commands::Serve(args)) => cmd::serve::run(args),
        Some(Commands::Catalog) => cmd::catalog::run(cli.json),
        Some(Commands::Select { keys, seed }) => cmd::select::run(keys, seed, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
