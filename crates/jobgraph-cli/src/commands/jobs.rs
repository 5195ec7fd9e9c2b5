//! Jobs command - list declared jobs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{build_grapher, expand_tilde, load_config};
use crate::progress;
use crate::GlobalOptions;

/// Arguments for the jobs command
#[derive(Args, Debug)]
pub struct JobsArgs {
    /// Directories to scan (a leading `~` is expanded)
    #[arg(required = true)]
    dirs: Vec<String>,
}

/// Execute the jobs command
pub fn execute(args: JobsArgs, global: GlobalOptions) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&global, &cwd)?;
    let grapher = build_grapher(&config, None, false)?;

    let dirs: Vec<PathBuf> = args.dirs.iter().map(|d| expand_tilde(d)).collect();

    let pb = progress::spinner("Scanning for job declarations...", global.quiet);
    let graph = grapher.scan(&dirs)?;
    progress::finish_spinner(
        pb,
        &format!("Found {} job declaration(s)", graph.declaration_count()),
    );

    let mut declarations = graph.declarations().to_vec();
    declarations.sort();

    if global.quiet {
        // Machine-readable
        let jobs: Vec<_> = declarations
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.declared_name,
                    "path": d.location.path,
                    "line": d.location.line_number,
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&jobs)?);
    } else {
        for declaration in &declarations {
            println!(
                "{}  {}:{}",
                declaration.declared_name, declaration.location.path, declaration.location.line_number
            );
        }
    }

    Ok(())
}
