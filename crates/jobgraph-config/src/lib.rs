//! jobgraph Configuration Management
//!
//! Provides configuration loading with support for:
//! - Global config: `~/.jobgraph/config.toml`
//! - Local config: `.jobgraph/config.toml` (in the scanned project)
//! - CLI overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: defaults → global → local → CLI
//! overrides.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Root configuration for jobgraph.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobGraphConfig {
    /// Scan configuration
    pub scan: ScanConfig,

    /// Output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Scan configuration: what counts as a job and which files to look at.
///
/// # Example TOML
///
/// ```toml
/// [scan]
/// job_suffix = "Worker"
/// invocation_method = "perform_async"
/// extensions = ["rb"]
/// exclude_patterns = ["**/spec/**", "**/features/**"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Type-name suffix identifying job classes
    pub job_suffix: String,

    /// Method-name prefix identifying invocation sites
    pub invocation_method: String,

    /// File extensions to scan
    pub extensions: Vec<String>,

    /// Glob patterns excluded from the scan (test-only paths by default)
    pub exclude_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            job_suffix: "Job".to_string(),
            invocation_method: "perform".to_string(),
            extensions: vec!["rb".to_string(), "rake".to_string(), "ru".to_string()],
            exclude_patterns: vec!["**/spec/**".to_string(), "**/test/**".to_string()],
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// How invoking identities are displayed
    pub path_display: PathDisplay,
}

/// Display form for path-based invoking identities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PathDisplay {
    /// Replace the home-directory prefix with `~` (default)
    #[default]
    Tilde,
    /// Show paths as reported by the search provider
    Full,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// CLI overrides for configuration values.
///
/// Used to apply command-line arguments over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override the job type-name suffix
    pub job_suffix: Option<String>,

    /// Override the invocation-method prefix
    pub invocation_method: Option<String>,

    /// Additional exclude patterns (extend, not replace)
    pub exclude_patterns: Vec<String>,

    /// Override path display
    pub path_display: Option<PathDisplay>,

    /// Override log level
    pub log_level: Option<String>,
}

impl JobGraphConfig {
    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref suffix) = overrides.job_suffix {
            self.scan.job_suffix = suffix.clone();
        }

        if let Some(ref method) = overrides.invocation_method {
            self.scan.invocation_method = method.clone();
        }

        for pattern in &overrides.exclude_patterns {
            if !self.scan.exclude_patterns.contains(pattern) {
                self.scan.exclude_patterns.push(pattern.clone());
            }
        }

        if let Some(path_display) = overrides.path_display {
            self.output.path_display = path_display;
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = JobGraphConfig::default();
        assert_eq!(config.scan.job_suffix, "Job");
        assert_eq!(config.scan.invocation_method, "perform");
        assert_eq!(config.scan.extensions, vec!["rb", "rake", "ru"]);
        assert_eq!(config.output.path_display, PathDisplay::Tilde);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = JobGraphConfig::default();
        let overrides = ConfigOverrides {
            job_suffix: Some("Worker".to_string()),
            exclude_patterns: vec!["**/features/**".to_string()],
            path_display: Some(PathDisplay::Full),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };

        config.apply_overrides(&overrides);

        assert_eq!(config.scan.job_suffix, "Worker");
        assert_eq!(config.output.path_display, PathDisplay::Full);
        assert_eq!(config.logging.level, "debug");
        assert!(config
            .scan
            .exclude_patterns
            .contains(&"**/features/**".to_string()));
        // Defaults are extended, not replaced
        assert!(config
            .scan
            .exclude_patterns
            .contains(&"**/spec/**".to_string()));
    }

    #[test]
    fn test_override_does_not_duplicate_patterns() {
        let mut config = JobGraphConfig::default();
        let overrides = ConfigOverrides {
            exclude_patterns: vec!["**/spec/**".to_string()],
            ..Default::default()
        };

        config.apply_overrides(&overrides);

        let count = config
            .scan
            .exclude_patterns
            .iter()
            .filter(|p| p.as_str() == "**/spec/**")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_scan_config_toml_roundtrip() {
        let config = ScanConfig {
            job_suffix: "Worker".to_string(),
            invocation_method: "perform_async".to_string(),
            extensions: vec!["rb".to_string()],
            exclude_patterns: vec!["**/spec/**".to_string()],
        };

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: ScanConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: JobGraphConfig = toml::from_str(
            r#"
            [scan]
            job_suffix = "Worker"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.job_suffix, "Worker");
        assert_eq!(config.scan.invocation_method, "perform");
        assert_eq!(config.logging.level, "info");
    }
}
