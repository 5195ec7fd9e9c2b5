//! Search provider: regex matching over walked source trees.
//!
//! Stands in for a shell-out to ripgrep. Yields matches as
//! `path:line_number:content` lines, the format `MatchedLine` parses.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Errors from scanning a source tree.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search directory does not exist: {0}")]
    DirNotFound(PathBuf),

    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidExclude {
        pattern: String,
        source: globset::Error,
    },

    #[error("could not compile exclude patterns: {0}")]
    ExcludeSet(#[from] globset::Error),
}

/// Streams matching lines from a directory tree.
///
/// The provider owns test-path exclusion: callers receive matches from
/// production source only. Each call produces one finite batch.
pub trait SearchProvider {
    /// All lines under `dir` matching `pattern`, as
    /// `path:line_number:content` strings.
    fn search(&self, dir: &Path, pattern: &Regex) -> Result<Vec<String>, SearchError>;
}

/// Configuration for [`RegexSearcher`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// File extensions to scan.
    pub extensions: Vec<String>,
    /// Glob patterns excluded from the scan, matched against paths
    /// relative to the search directory.
    pub exclude_patterns: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["rb".to_string(), "rake".to_string(), "ru".to_string()],
            exclude_patterns: vec!["**/spec/**".to_string(), "**/test/**".to_string()],
        }
    }
}

/// Line-oriented regex searcher over a gitignore-aware directory walk.
#[derive(Debug)]
pub struct RegexSearcher {
    config: SearchConfig,
    exclude: GlobSet,
}

impl RegexSearcher {
    /// Create a searcher from the given configuration.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| SearchError::InvalidExclude {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let exclude = builder.build()?;

        Ok(Self { config, exclude })
    }

    /// Collect scannable files under a directory, in sorted order.
    ///
    /// Uses the `ignore` walker, which respects:
    /// - `.gitignore` files
    /// - `.jobgraphignore` files (custom exclusions for jobgraph scans)
    /// - Global gitignore patterns
    fn collect_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(dir)
            .follow_links(false)
            .hidden(true) // Skip hidden files/directories
            .git_ignore(true) // Respect .gitignore
            .git_global(true) // Respect global gitignore
            .git_exclude(true) // Respect .git/info/exclude
            .add_custom_ignore_filename(".jobgraphignore")
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!("Error walking directory: {}", err);
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Some(ft) => ft,
                None => continue,
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if !self.has_scannable_extension(path) {
                continue;
            }

            let rel_path = path.strip_prefix(dir).unwrap_or(path).to_string_lossy();
            if self.exclude.is_match(rel_path.as_ref()) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        files.sort();
        files
    }

    fn has_scannable_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.config.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

impl SearchProvider for RegexSearcher {
    fn search(&self, dir: &Path, pattern: &Regex) -> Result<Vec<String>, SearchError> {
        if !dir.is_dir() {
            return Err(SearchError::DirNotFound(dir.to_path_buf()));
        }

        let mut matches = Vec::new();
        for path in self.collect_files(dir) {
            let text = match std::fs::read_to_string(&path) {
                Ok(t) => t,
                Err(err) => {
                    debug!("Skipping unreadable file {:?}: {}", path, err);
                    continue;
                }
            };
            for (index, line) in text.lines().enumerate() {
                if pattern.is_match(line) {
                    matches.push(format!("{}:{}:{}", path.display(), index + 1, line));
                }
            }
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_file(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn searcher() -> RegexSearcher {
        RegexSearcher::new(SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_search_reports_path_line_and_content() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "app/runner.rb", "class Runner\n  FooJob.perform\nend\n");

        let pattern = Regex::new(r"Job\.perform").unwrap();
        let matches = searcher().search(temp.path(), &pattern).unwrap();

        assert_eq!(matches.len(), 1);
        let expected = format!(
            "{}:2:  FooJob.perform",
            temp.path().join("app/runner.rb").display()
        );
        assert_eq!(matches[0], expected);
    }

    #[test]
    fn test_search_skips_excluded_paths() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "app/runner.rb", "FooJob.perform\n");
        write_file(temp.path(), "spec/runner_spec.rb", "FooJob.perform\n");
        write_file(temp.path(), "test/runner_test.rb", "FooJob.perform\n");

        let pattern = Regex::new(r"Job\.perform").unwrap();
        let matches = searcher().search(temp.path(), &pattern).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].contains("app/runner.rb"));
    }

    #[test]
    fn test_search_skips_unknown_extensions() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "notes.md", "FooJob.perform\n");
        write_file(temp.path(), "tasks.rake", "FooJob.perform\n");

        let pattern = Regex::new(r"Job\.perform").unwrap();
        let matches = searcher().search(temp.path(), &pattern).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].contains("tasks.rake"));
    }

    #[test]
    fn test_search_results_are_sorted_by_path() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "b.rb", "FooJob.perform\n");
        write_file(temp.path(), "a.rb", "FooJob.perform\n");

        let pattern = Regex::new(r"Job\.perform").unwrap();
        let matches = searcher().search(temp.path(), &pattern).unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches[0].contains("a.rb"));
        assert!(matches[1].contains("b.rb"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let pattern = Regex::new(r"x").unwrap();
        let result = searcher().search(Path::new("/nonexistent/dir"), &pattern);
        assert!(matches!(result, Err(SearchError::DirNotFound(_))));
    }

    #[test]
    fn test_invalid_exclude_pattern_is_an_error() {
        let config = SearchConfig {
            exclude_patterns: vec!["a{".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            RegexSearcher::new(config),
            Err(SearchError::InvalidExclude { .. })
        ));
    }

    #[test]
    fn test_custom_ignore_file_is_respected() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "app/runner.rb", "FooJob.perform\n");
        write_file(temp.path(), "vendor/gem.rb", "FooJob.perform\n");
        write_file(temp.path(), ".jobgraphignore", "vendor/\n");

        let pattern = Regex::new(r"Job\.perform").unwrap();
        let matches = searcher().search(temp.path(), &pattern).unwrap();

        assert_eq!(matches.len(), 1);
        assert!(matches[0].contains("app/runner.rb"));
    }
}
