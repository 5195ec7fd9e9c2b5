//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.jobgraph/config.toml`
//! 2. Local config: `.jobgraph/config.toml` (in the scanned project)
//! 3. CLI overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{ConfigOverrides, JobGraphConfig, LoggingConfig, OutputConfig, PathDisplay, ScanConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name, both global (under `$HOME`) and local.
const CONFIG_DIR: &str = ".jobgraph";

/// Configuration loader with inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.jobgraph`)
    global_config_dir: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// Automatically detects the global config directory (`~/.jobgraph`).
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(CONFIG_DIR));

        Self { global_config_dir }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the local config file path for a project directory.
    pub fn local_config_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for a project with optional CLI overrides.
    ///
    /// Merges config in order: defaults → global → local → overrides.
    pub fn load(
        &self,
        project_root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<JobGraphConfig, ConfigError> {
        let mut config = JobGraphConfig::default();

        if let Some(global_config) = self.load_global()? {
            config = merge_configs(config, global_config);
        }

        if let Some(local_config) = self.load_local(project_root)? {
            config = merge_configs(config, local_config);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        Ok(config)
    }

    /// Load only the global configuration.
    pub fn load_global(&self) -> Result<Option<JobGraphConfig>, ConfigError> {
        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        load_config_file(&global_path).map(Some)
    }

    /// Load only the local configuration for a project.
    pub fn load_local(&self, project_root: &Path) -> Result<Option<JobGraphConfig>, ConfigError> {
        let local_path = self.local_config_path(project_root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Load configuration from an explicit file, skipping the merge
    /// chain.
    pub fn load_file(&self, path: &Path) -> Result<JobGraphConfig, ConfigError> {
        debug!("Loading config from {:?}", path);
        load_config_file(path)
    }

    /// Save configuration to the local config file for a project.
    pub fn save_local(
        &self,
        project_root: &Path,
        config: &JobGraphConfig,
    ) -> Result<(), ConfigError> {
        let local_path = self.local_config_path(project_root);
        save_config_file(&local_path, config)
    }

    /// Initialize local configuration for a project.
    ///
    /// Creates `.jobgraph/config.toml` with default configuration if it
    /// does not already exist.
    pub fn init_local(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        let local_dir = project_root.join(CONFIG_DIR);

        if !local_dir.exists() {
            std::fs::create_dir_all(&local_dir)
                .map_err(|e| ConfigError::create_dir(&local_dir, e))?;
        }

        let config_path = local_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            let default_config = JobGraphConfig::default();
            save_config_file(&config_path, &default_config)?;
        }

        Ok(config_path)
    }
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<JobGraphConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

/// Save a configuration file to disk.
fn save_config_file(path: &Path, config: &JobGraphConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}

/// Merge two configurations, with `overlay` taking precedence.
///
/// Field-by-field merge, allowing partial configs: an overlay field left
/// at its default keeps the base value.
fn merge_configs(base: JobGraphConfig, overlay: JobGraphConfig) -> JobGraphConfig {
    JobGraphConfig {
        scan: merge_scan(base.scan, overlay.scan),
        output: merge_output(base.output, overlay.output),
        logging: merge_logging(base.logging, overlay.logging),
    }
}

fn merge_scan(base: ScanConfig, overlay: ScanConfig) -> ScanConfig {
    let defaults = ScanConfig::default();
    ScanConfig {
        job_suffix: if overlay.job_suffix != defaults.job_suffix {
            overlay.job_suffix
        } else {
            base.job_suffix
        },
        invocation_method: if overlay.invocation_method != defaults.invocation_method {
            overlay.invocation_method
        } else {
            base.invocation_method
        },
        extensions: if overlay.extensions != defaults.extensions {
            overlay.extensions
        } else {
            base.extensions
        },
        // Exclude patterns extend rather than replace
        exclude_patterns: {
            let mut patterns = base.exclude_patterns;
            for pattern in overlay.exclude_patterns {
                if !patterns.contains(&pattern) {
                    patterns.push(pattern);
                }
            }
            patterns
        },
    }
}

fn merge_output(base: OutputConfig, overlay: OutputConfig) -> OutputConfig {
    OutputConfig {
        path_display: if overlay.path_display != PathDisplay::default() {
            overlay.path_display
        } else {
            base.path_display
        },
    }
}

fn merge_logging(base: LoggingConfig, overlay: LoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: if overlay.level != "info" {
            overlay.level
        } else {
            base.level
        },
    }
}
