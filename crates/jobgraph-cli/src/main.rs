//! jobgraph CLI - Background-job call graph extraction
//!
//! A command-line interface for scanning source trees for background-job
//! invocation and declaration sites and rendering the inferred call
//! graph as a PlantUML diagram.
//!
//! # Usage
//!
//! ```bash
//! # Render the call graph for one or more source trees
//! jobgraph graph ~/git/app ~/git/engine
//!
//! # Keep only edges to ingest-related jobs, written to a file
//! jobgraph graph ~/git/app --filter Ingest --output jobs.puml
//!
//! # List declared jobs
//! jobgraph jobs ~/git/app
//!
//! # Show the effective configuration
//! jobgraph config show
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod progress;

/// jobgraph - Background-job call graph extraction
#[derive(Parser, Debug)]
#[command(name = "jobgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to configuration file
    #[arg(long, short = 'c', global = true, env = "JOBGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output (machine-readable where supported)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Job type-name suffix to recognize
    #[arg(long, global = true, env = "JOBGRAPH_JOB_SUFFIX")]
    job_suffix: Option<String>,

    /// Invocation-method prefix to recognize
    #[arg(long, global = true, env = "JOBGRAPH_INVOCATION_METHOD")]
    invocation_method: Option<String>,
}

impl GlobalOptions {
    /// Convert global options to config overrides
    pub fn to_config_overrides(&self) -> jobgraph_config::ConfigOverrides {
        jobgraph_config::ConfigOverrides {
            job_suffix: self.job_suffix.clone(),
            invocation_method: self.invocation_method.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the job call graph as a PlantUML diagram
    Graph(commands::graph::GraphArgs),

    /// List declared jobs found in the scanned directories
    Jobs(commands::jobs::JobsArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; without a flag the configured
    // level applies
    let log_level = if cli.global.quiet {
        Level::ERROR
    } else if cli.global.verbose {
        Level::DEBUG
    } else {
        commands::configured_log_level(&cli.global)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute the command
    match cli.command {
        Commands::Graph(args) => commands::graph::execute(args, cli.global),
        Commands::Jobs(args) => commands::jobs::execute(args, cli.global),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global),
    }
}
