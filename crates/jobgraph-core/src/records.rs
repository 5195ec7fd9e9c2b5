//! Invocation and declaration records.
//!
//! Turns raw search-provider matches into the immutable records the edge
//! compiler consumes: where a job was invoked (and under which candidate
//! names the reference may resolve), and where a job was declared.

use std::cmp::Ordering;

use regex::Regex;
use thiserror::Error;

use crate::matcher::{MatchError, MatchedLine};
use crate::scope::{ScopeResolver, SEPARATOR};

/// Errors from building a record out of a search line.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Match(#[from] MatchError),

    /// The matched content did not contain the expected job pattern.
    #[error("no job reference in matched line {path}:{line_number}: {content:?}")]
    JobNotFound {
        path: String,
        line_number: u32,
        content: String,
    },
}

/// One line in one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub path: String,
    pub line_number: u32,
}

impl SourceLocation {
    fn from_matched(matched: &MatchedLine) -> Self {
        Self {
            path: matched.path.clone(),
            line_number: matched.line_number,
        }
    }
}

/// Recognition patterns for job invocation and declaration sites.
///
/// Built from the job type-name suffix (`Job`) and the invocation-method
/// prefix (`perform`, which also matches `perform_later`, `perform_async`
/// and friends as prefixes).
#[derive(Debug, Clone)]
pub struct JobPatterns {
    /// Extracts the invoked job reference from matched line content.
    invocation: Regex,
    /// Extracts the declared job name from matched line content.
    declaration: Regex,
    /// Search-provider pattern for invocation sites.
    invocation_search: Regex,
    /// Search-provider pattern for declaration sites.
    declaration_search: Regex,
}

impl JobPatterns {
    /// Build patterns for the given job suffix and invocation-method
    /// prefix. The inputs are treated as literals.
    pub fn new(job_suffix: &str, invocation_method: &str) -> Result<Self, regex::Error> {
        let suffix = regex::escape(job_suffix);
        let method = regex::escape(invocation_method);
        Ok(Self {
            invocation: Regex::new(&format!(r"(?P<job>[\w:]+{suffix})\.{method}"))?,
            declaration: Regex::new(&format!(r"(?P<job>[\w:]+{suffix}) <"))?,
            invocation_search: Regex::new(&format!(r"^ *[^#]*{suffix}\.{method}"))?,
            declaration_search: Regex::new(&format!(r"^ *class ([\w:]+){suffix} <"))?,
        })
    }

    /// The invoked job reference in `content`, if any. May itself be
    /// qualified (`Foo::BarJob`).
    pub fn invocation_job<'t>(&self, content: &'t str) -> Option<&'t str> {
        self.invocation
            .captures(content)
            .and_then(|caps| caps.name("job"))
            .map(|m| m.as_str())
    }

    /// The declared job name in `content`, if the line is a subclass
    /// opening.
    pub fn declaration_job<'t>(&self, content: &'t str) -> Option<&'t str> {
        self.declaration
            .captures(content)
            .and_then(|caps| caps.name("job"))
            .map(|m| m.as_str())
    }

    /// Pattern handed to the search provider for invocation sites.
    pub fn invocation_search(&self) -> &Regex {
        &self.invocation_search
    }

    /// Pattern handed to the search provider for declaration sites.
    pub fn declaration_search(&self) -> &Regex {
        &self.declaration_search
    }
}

impl Default for JobPatterns {
    fn default() -> Self {
        Self::new("Job", "perform").expect("default job patterns are valid")
    }
}

/// One matched invocation site: the invoking identity and the ordered
/// candidate names its job reference may resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    pub location: SourceLocation,
    /// Qualified name of the invoking scope, or the file path when the
    /// line has no enclosing namespace.
    pub invoking_name: String,
    /// Candidate target names, least-qualified first. The first entry is
    /// always the bare job reference; resolution tries them in order.
    pub candidates: Vec<String>,
}

impl InvocationRecord {
    /// Build a record from one raw invocation search line.
    pub fn from_search_line(
        line: &str,
        patterns: &JobPatterns,
        resolver: &ScopeResolver,
    ) -> Result<Self, RecordError> {
        let matched = MatchedLine::parse(line)?;
        let job = patterns.invocation_job(&matched.content).ok_or_else(|| {
            RecordError::JobNotFound {
                path: matched.path.clone(),
                line_number: matched.line_number,
                content: matched.content.clone(),
            }
        })?;

        let scope = resolver.resolve(&matched.path, matched.line_number);
        let (invoking_name, candidates) = if scope.is_empty() {
            (matched.path.clone(), vec![job.to_string()])
        } else {
            let namespace = scope.to_string();
            let candidates = candidates_for(job, &namespace);
            (namespace, candidates)
        };

        Ok(Self {
            location: SourceLocation::from_matched(&matched),
            invoking_name,
            candidates,
        })
    }
}

/// Candidate names for `job` invoked inside `namespace`: the bare
/// reference, then the reference qualified by each increasing prefix of
/// the namespace. The order is the resolution tie-break, matching Ruby
/// constant lookup (nearest enclosing scope wins).
fn candidates_for(job: &str, namespace: &str) -> Vec<String> {
    let segments: Vec<&str> = namespace.split(SEPARATOR).collect();
    let mut candidates = Vec::with_capacity(segments.len() + 1);
    candidates.push(job.to_string());
    for i in 1..=segments.len() {
        candidates.push(format!(
            "{}{}{}",
            segments[..i].join(SEPARATOR),
            SEPARATOR,
            job
        ));
    }
    candidates
}

/// One matched declaration site: the job's own fully-qualified name.
///
/// The declaration line itself contributes the innermost name segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRecord {
    pub location: SourceLocation,
    pub declared_name: String,
}

impl DeclarationRecord {
    /// Build a record from one raw declaration search line.
    pub fn from_search_line(
        line: &str,
        patterns: &JobPatterns,
        resolver: &ScopeResolver,
    ) -> Result<Self, RecordError> {
        let matched = MatchedLine::parse(line)?;
        if patterns.declaration_job(&matched.content).is_none() {
            return Err(RecordError::JobNotFound {
                path: matched.path.clone(),
                line_number: matched.line_number,
                content: matched.content.clone(),
            });
        }

        let declared_name = resolver
            .resolve(&matched.path, matched.line_number)
            .to_string();

        Ok(Self {
            location: SourceLocation::from_matched(&matched),
            declared_name,
        })
    }
}

impl PartialOrd for DeclarationRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeclarationRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.declared_name
            .cmp(&other.declared_name)
            .then_with(|| self.location.cmp(&other.location))
    }
}
