//! Search-line splitting.
//!
//! The search provider reports matches as `path:line_number:content`
//! lines. The path and line number never contain the field separator;
//! the content may.

use thiserror::Error;

/// Errors from splitting a search-result line.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The line is missing the two leading field separators.
    #[error("malformed search line (expected 'path:line:content'): {0:?}")]
    MalformedLine(String),
}

/// One search-provider match, split into structured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// Path to the matched file, trimmed of surrounding whitespace.
    pub path: String,
    /// 1-based line number; 0 when the field failed to parse.
    pub line_number: u32,
    /// The matched line content.
    pub content: String,
}

impl MatchedLine {
    /// Split a `path:line_number:content` line into its three fields.
    ///
    /// The line number parses permissively: a non-numeric field becomes 0
    /// so a single encoding oddity does not abort a whole scan.
    pub fn parse(line: &str) -> Result<Self, MatchError> {
        let (path, rest) = line
            .split_once(':')
            .ok_or_else(|| MatchError::MalformedLine(line.to_string()))?;
        let (number, content) = rest
            .split_once(':')
            .ok_or_else(|| MatchError::MalformedLine(line.to_string()))?;

        Ok(Self {
            path: path.trim().to_string(),
            line_number: number.parse().unwrap_or(0),
            content: content.to_string(),
        })
    }
}
