//! Graph command - render the job call graph

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use jobgraph_core::JobGraph;
use regex::Regex;

use super::{build_grapher, expand_tilde, load_config, print_info};
use crate::progress;
use crate::GlobalOptions;

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Directories to scan (a leading `~` is expanded)
    #[arg(required = true)]
    dirs: Vec<String>,

    /// Write the diagram to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Keep only edges whose resolved job name matches this regex
    #[arg(long, short = 'f')]
    filter: Option<String>,

    /// Show invoking file paths verbatim instead of tilde-shortened
    #[arg(long)]
    full_paths: bool,

    /// Additional exclusion globs for the scan
    #[arg(long, short = 'e')]
    exclude: Vec<String>,
}

/// Execute the graph command
pub fn execute(args: GraphArgs, global: GlobalOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mut config = load_config(&global, &cwd)?;
    for pattern in &args.exclude {
        if !config.scan.exclude_patterns.contains(pattern) {
            config.scan.exclude_patterns.push(pattern.clone());
        }
    }

    let filter = args
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --filter regex")?;
    let grapher = build_grapher(&config, filter, args.full_paths)?;

    let dirs: Vec<PathBuf> = args.dirs.iter().map(|d| expand_tilde(d)).collect();

    let pb = progress::progress_bar(dirs.len() as u64, "Scanning", global.quiet);
    let mut graph = JobGraph::new();
    for dir in &dirs {
        grapher
            .scan_into(dir, &mut graph)
            .with_context(|| format!("Failed to scan {}", dir.display()))?;
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    progress::finish_progress(pb);

    match args.output {
        Some(ref path) => {
            let mut file =
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            grapher.render(&graph, &mut file)?;
            print_info(&format!("Wrote {}", path.display()), global.quiet);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            grapher.render(&graph, &mut lock)?;
        }
    }

    Ok(())
}
