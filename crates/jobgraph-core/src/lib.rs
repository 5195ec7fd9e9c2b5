//! jobgraph-core - Background-job call graph extraction
//!
//! This crate provides the core pipeline for discovering background-job
//! invocation and declaration sites in source trees:
//! - Line-oriented search over gitignore-aware directory walks
//! - Qualified-name reconstruction from indentation-based nesting
//! - Namespace-aware candidate resolution of invocations against declarations
//! - Deduplicated edge compilation and PlantUML rendering

// Implemented modules
pub mod grapher;
pub mod graph;
pub mod matcher;
pub mod records;
pub mod render;
pub mod scope;
pub mod search;

// Re-exports for convenience
pub use grapher::{
    accept_all, tilde_formatter, GraphOptions, GrapherError, JobFilter, JobGrapher, PathFormatter,
};
pub use graph::{Edge, JobGraph};
pub use matcher::{MatchError, MatchedLine};
pub use records::{
    DeclarationRecord, InvocationRecord, JobPatterns, RecordError, SourceLocation,
};
pub use render::render_plantuml;
pub use scope::{QualifiedName, ScopeResolver, SEPARATOR};
pub use search::{RegexSearcher, SearchConfig, SearchError, SearchProvider};
