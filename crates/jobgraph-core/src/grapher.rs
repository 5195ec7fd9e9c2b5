//! Pipeline orchestration: scan directories, accumulate records, compile
//! and render.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::graph::JobGraph;
use crate::records::{DeclarationRecord, InvocationRecord, JobPatterns, RecordError};
use crate::render::render_plantuml;
use crate::scope::ScopeResolver;
use crate::search::{SearchError, SearchProvider};

/// Errors from running the pipeline.
#[derive(Debug, Error)]
pub enum GrapherError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("could not write diagram: {0}")]
    Render(#[from] io::Error),
}

/// Inclusion filter over resolved targets; `None` means no candidate
/// matched a declaration.
pub type JobFilter = Box<dyn Fn(Option<&str>) -> bool>;

/// Display formatting for invoking identities.
pub type PathFormatter = Box<dyn Fn(&str) -> String>;

/// Explicit pipeline configuration.
///
/// Defaults: recognize `*Job.perform*` sites, accept every edge, and
/// tilde-format invoking identities.
pub struct GraphOptions {
    /// Recognition patterns for invocation/declaration sites.
    pub patterns: JobPatterns,
    /// Keeps or drops an edge given its resolved target.
    pub filter: JobFilter,
    /// Formats the `from` side of each edge for display.
    pub path_formatter: PathFormatter,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            patterns: JobPatterns::default(),
            filter: Box::new(accept_all),
            path_formatter: Box::new(|path| tilde_formatter(path)),
        }
    }
}

/// The default filter: accepts every target, resolved or not.
pub fn accept_all(_target: Option<&str>) -> bool {
    true
}

/// The default path formatter: replaces a home-directory prefix with `~`.
///
/// Identities that are qualified names rather than paths pass through
/// unchanged.
pub fn tilde_formatter(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    match path.strip_prefix(home.as_ref()) {
        Some(rest) => format!("~{}", rest),
        None => path.to_string(),
    }
}

/// Orchestrates the scan → record → compile → render pipeline.
pub struct JobGrapher<P: SearchProvider> {
    provider: P,
    options: GraphOptions,
    resolver: ScopeResolver,
}

impl<P: SearchProvider> JobGrapher<P> {
    pub fn new(provider: P, options: GraphOptions) -> Self {
        Self {
            provider,
            options,
            resolver: ScopeResolver::new(),
        }
    }

    /// Scan one directory's invocation and declaration sites into `graph`.
    pub fn scan_into(&self, dir: &Path, graph: &mut JobGraph) -> Result<(), GrapherError> {
        let patterns = &self.options.patterns;

        for line in self.provider.search(dir, patterns.invocation_search())? {
            let record = InvocationRecord::from_search_line(&line, patterns, &self.resolver)?;
            graph.add_invocation(record);
        }
        for line in self.provider.search(dir, patterns.declaration_search())? {
            let record = DeclarationRecord::from_search_line(&line, patterns, &self.resolver)?;
            graph.add_declaration(record);
        }
        Ok(())
    }

    /// Scan every directory and return the accumulated record set.
    pub fn scan(&self, dirs: &[PathBuf]) -> Result<JobGraph, GrapherError> {
        let mut graph = JobGraph::new();
        for dir in dirs {
            debug!("Scanning {:?}", dir);
            self.scan_into(dir, &mut graph)?;
        }
        info!(
            "Collected {} invocation(s) and {} declaration(s) from {} directories",
            graph.invocation_count(),
            graph.declaration_count(),
            dirs.len()
        );
        Ok(graph)
    }

    /// Compile the accumulated records and write the PlantUML diagram to
    /// `sink`.
    pub fn render(&self, graph: &JobGraph, sink: &mut impl Write) -> Result<(), GrapherError> {
        let edges = graph.compile(
            self.options.filter.as_ref(),
            self.options.path_formatter.as_ref(),
        );
        info!("Compiled {} edge(s)", edges.len());
        render_plantuml(&edges, sink)?;
        Ok(())
    }

    /// Run the whole pipeline and write the PlantUML diagram to `sink`.
    ///
    /// All directories are scanned before the single batch compile:
    /// candidate resolution needs the full declaration set.
    pub fn generate(&self, dirs: &[PathBuf], sink: &mut impl Write) -> Result<(), GrapherError> {
        let graph = self.scan(dirs)?;
        self.render(&graph, sink)
    }
}
