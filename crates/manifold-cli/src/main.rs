//! manifold: versioned deployment manifests.
//!
//! # Usage
//!
//! ```text
//! manifold --manifest staging upload --file dist/index.html
//! manifold --manifest staging list
//! manifold --manifest staging activate --revision 3f2a9c1d0b7e
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod report;
mod settings;

#[derive(Parser)]
#[command(
    name = "manifold",
    about = "Manifold: versioned deployment manifests",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to manifold.toml.
    #[arg(short, long, global = true, default_value = "manifold.toml")]
    config: PathBuf,

    /// Manifest to operate on. Overrides `manifest` in manifold.toml.
    #[arg(short, long, global = true)]
    manifest: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a manifold.toml scaffold.
    Init,
    /// Upload a new revision.
    Upload {
        /// Read the revision payload from this file.
        #[arg(short, long, conflicts_with = "payload", required_unless_present = "payload")]
        file: Option<PathBuf>,
        /// Use this text as the revision payload.
        #[arg(short, long)]
        payload: Option<String>,
    },
    /// List uploaded revisions and mark the current one.
    List {
        /// Number of revisions to show (default: manifest_size from config).
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Make a revision current.
    Activate {
        /// Revision key, as printed by `upload` or `list`.
        #[arg(short, long)]
        revision: Option<String>,
    },
    /// Show the current revision and its index.
    Current {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,manifold_index=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let manifest = cli.manifest.as_deref();

    match cli.command {
        Commands::Init => commands::init::init(&cli.config, manifest),
        Commands::Upload { file, payload } => {
            let (_, index) = settings::open(&cli.config, manifest)?;
            commands::upload::upload(&index, file.as_deref(), payload.as_deref()).await
        }
        Commands::List { limit, format } => {
            let (config, index) = settings::open(&cli.config, manifest)?;
            let limit = limit.unwrap_or(config.manifest_size);
            commands::list::list(&index, limit, &format).await
        }
        Commands::Activate { revision } => {
            let (_, index) = settings::open(&cli.config, manifest)?;
            commands::activate::activate(&index, revision.as_deref()).await
        }
        Commands::Current { format } => {
            let (_, index) = settings::open(&cli.config, manifest)?;
            commands::current::current(&index, &format).await
        }
    }
}
