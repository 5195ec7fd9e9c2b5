//! CLI command implementations
//!
//! This module contains all jobgraph CLI command implementations.

pub mod config;
pub mod graph;
pub mod jobs;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jobgraph_config::{ConfigLoader, JobGraphConfig, PathDisplay};
use jobgraph_core::{
    accept_all, tilde_formatter, GraphOptions, JobFilter, JobGrapher, JobPatterns, PathFormatter,
    RegexSearcher, SearchConfig,
};
use regex::Regex;
use tracing::Level;

use crate::GlobalOptions;

/// Load configuration with optional config file override.
pub fn load_config(global: &GlobalOptions, project_root: &Path) -> Result<JobGraphConfig> {
    let loader = ConfigLoader::new();

    let mut config = if let Some(ref config_path) = global.config {
        loader
            .load_file(config_path)
            .context("Failed to load config file")?
    } else {
        loader
            .load(project_root, None)
            .context("Failed to load configuration")?
    };

    config.apply_overrides(&global.to_config_overrides());
    Ok(config)
}

/// Log level from the merged configuration, for when no verbosity flag
/// is set.
pub fn configured_log_level(global: &GlobalOptions) -> Level {
    let Ok(cwd) = std::env::current_dir() else {
        return Level::INFO;
    };
    match load_config(global, &cwd) {
        Ok(config) => config.logging.level.parse().unwrap_or(Level::INFO),
        Err(_) => Level::INFO,
    }
}

/// Build the core pipeline from the merged configuration.
pub fn build_grapher(
    config: &JobGraphConfig,
    filter: Option<Regex>,
    full_paths: bool,
) -> Result<JobGrapher<RegexSearcher>> {
    let patterns = JobPatterns::new(&config.scan.job_suffix, &config.scan.invocation_method)
        .context("Invalid job patterns")?;

    let searcher = RegexSearcher::new(SearchConfig {
        extensions: config.scan.extensions.clone(),
        exclude_patterns: config.scan.exclude_patterns.clone(),
    })
    .context("Invalid scan configuration")?;

    let path_formatter: PathFormatter =
        if full_paths || config.output.path_display == PathDisplay::Full {
            Box::new(|path: &str| path.to_string())
        } else {
            Box::new(|path: &str| tilde_formatter(path))
        };

    let job_filter: JobFilter = match filter {
        Some(pattern) => {
            Box::new(move |target: Option<&str>| target.is_some_and(|t| pattern.is_match(t)))
        }
        None => Box::new(accept_all),
    };

    Ok(JobGrapher::new(
        searcher,
        GraphOptions {
            patterns,
            filter: job_filter,
            path_formatter,
        },
    ))
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            if rest.is_empty() {
                return home;
            }
            if let Some(stripped) = rest.strip_prefix('/') {
                return home.join(stripped);
            }
        }
    }
    PathBuf::from(dir)
}

/// Print an info message (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}
