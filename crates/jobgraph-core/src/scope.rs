//! Qualified-name reconstruction from lexical nesting.
//!
//! Rebuilds the `A::B::C` namespace active at a source line using
//! indentation as the nesting signal. This is a regex-and-heuristic
//! substitute for a real parser: files that do not indent nested
//! declarations monotonically will misresolve.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Separator joining qualified-name segments.
pub const SEPARATOR: &str = "::";

/// Indentation at or beyond this column is treated as pathological and
/// never accepted as an enclosing scope.
const INDENT_CEILING: usize = 80;

/// Namespace-opening line: leading spaces, a nominal-type or namespace
/// keyword, then one or more possibly-qualified name segments.
static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<padding> *)(?:class|module) +(?P<namespace>[\w:]+)(?:\s|$)")
        .expect("namespace pattern is valid")
});

/// One textual namespace-opening seen at or before a target line.
#[derive(Debug)]
struct NestingDeclaration {
    indent: usize,
    segment: String,
}

/// A fully-qualified nesting name: ordered segments joined by `::`.
///
/// May be empty, meaning no enclosing namespace was found; callers fall
/// back to the file path as the identity in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Build a name from outer-to-inner segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// True when no enclosing namespace was found.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The outer-to-inner segments.
    ///
    /// A segment may itself be pre-qualified (`A::B` from `module A::B`);
    /// split the joined display form to get individual namespace parts.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(SEPARATOR))
    }
}

/// Reconstructs qualified nesting names from raw source lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the qualified name active at `line_number` in the file at
    /// `path`.
    ///
    /// Returns an empty name when the file cannot be read.
    pub fn resolve(&self, path: impl AsRef<Path>, line_number: u32) -> QualifiedName {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => self.resolve_in_lines(text.lines(), line_number),
            Err(err) => {
                debug!("Could not read {:?} for scope resolution: {}", path, err);
                QualifiedName::default()
            }
        }
    }

    /// Resolve against an in-memory line sequence.
    ///
    /// Scans forward up to and including the 1-based `line_number`,
    /// collecting namespace-opening declarations, then accepts them
    /// innermost-first: a declaration becomes an enclosing scope only
    /// when its indentation is strictly smaller than every declaration
    /// accepted so far. Siblings and re-openings at the same or deeper
    /// level are rejected.
    pub fn resolve_in_lines<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
        line_number: u32,
    ) -> QualifiedName {
        let mut declarations = Vec::new();
        for (index, line) in lines.into_iter().enumerate() {
            if index as u32 + 1 > line_number {
                break;
            }
            if let Some(caps) = NAMESPACE_RE.captures(line) {
                declarations.push(NestingDeclaration {
                    indent: caps["padding"].len(),
                    segment: caps["namespace"].to_string(),
                });
            }
        }

        let mut min_indent = INDENT_CEILING;
        let mut segments = Vec::new();
        for declaration in declarations.iter().rev() {
            if declaration.indent < min_indent {
                min_indent = declaration.indent;
                segments.insert(0, declaration.segment.clone());
            }
        }
        QualifiedName::new(segments)
    }
}
