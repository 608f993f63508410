//! Detector configuration.
//!
//! Defaults detect everything with no in-degree filtering. Values can come
//! from an optional `singlemap.toml` in the working directory, with CLI
//! flags taking precedence over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "singlemap.toml";

/// Resolved configuration consumed by the analysis passes and exporters.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub detect_singletons: bool,
    pub detect_hingletons: bool,
    pub detect_mingletons: bool,
    pub detect_fingletons: bool,
    /// When false, classes with no classification of their own contribute
    /// no outgoing edges.
    pub include_others: bool,
    /// Minimum in-degree for direct visibility; `<= 0` disables filtering.
    pub threshold: i64,
    pub verbose: bool,
    pub show_stats: bool,
    pub show_banner: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detect_singletons: true,
            detect_hingletons: true,
            detect_mingletons: true,
            detect_fingletons: true,
            include_others: true,
            threshold: 0,
            verbose: false,
            show_stats: false,
            show_banner: false,
        }
    }
}

impl DetectorConfig {
    /// Layer an optional config file under already-parsed CLI values.
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(threshold) = file.threshold {
            self.threshold = threshold;
        }
        if let Some(v) = file.detect.singletons {
            self.detect_singletons = v;
        }
        if let Some(v) = file.detect.hingletons {
            self.detect_hingletons = v;
        }
        if let Some(v) = file.detect.mingletons {
            self.detect_mingletons = v;
        }
        if let Some(v) = file.detect.fingletons {
            self.detect_fingletons = v;
        }
        if let Some(v) = file.detect.others {
            self.include_others = v;
        }
        self
    }
}

impl DetectorConfig {
    /// Resolve the final configuration: defaults, then the optional config
    /// file, then CLI flags on top.
    pub fn from_cli(cli: &crate::cli::Cli, file: Option<&FileConfig>) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            config = config.with_file(file);
        }
        if let Some(threshold) = cli.threshold {
            config.threshold = threshold;
        }
        if cli.no_singletons {
            config.detect_singletons = false;
        }
        if cli.no_hingletons {
            config.detect_hingletons = false;
        }
        if cli.no_mingletons {
            config.detect_mingletons = false;
        }
        if cli.no_fingletons {
            config.detect_fingletons = false;
        }
        if cli.no_others {
            config.include_others = false;
        }
        config.verbose = cli.verbose;
        config.show_stats = cli.stats;
        config.show_banner = cli.banner;
        config
    }
}

/// On-disk configuration shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub threshold: Option<i64>,
    #[serde(default)]
    pub detect: DetectToggles,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectToggles {
    #[serde(default)]
    pub singletons: Option<bool>,
    #[serde(default)]
    pub hingletons: Option<bool>,
    #[serde(default)]
    pub mingletons: Option<bool>,
    #[serde(default)]
    pub fingletons: Option<bool>,
    #[serde(default)]
    pub others: Option<bool>,
}

/// Load `singlemap.toml` from a directory if present. A malformed file is a
/// hard error; analysis must not start on a half-read configuration.
pub fn load_file_config(dir: &Path) -> Result<Option<FileConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = toml::from_str(&raw)
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_detect_everything_unfiltered() {
        let config = DetectorConfig::default();
        assert!(config.detect_singletons);
        assert!(config.detect_fingletons);
        assert!(config.include_others);
        assert_eq!(config.threshold, 0);
    }

    #[test]
    fn file_values_apply_over_defaults() {
        let file: FileConfig = toml::from_str(indoc! {r#"
            threshold = 2

            [detect]
            mingletons = false
            others = false
        "#})
        .unwrap();

        let config = DetectorConfig::default().with_file(&file);
        assert_eq!(config.threshold, 2);
        assert!(!config.detect_mingletons);
        assert!(!config.include_others);
        assert!(config.detect_singletons);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_file_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "threshold = \"two\"").unwrap();
        assert!(load_file_config(dir.path()).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "thresold = 2").unwrap();
        assert!(load_file_config(dir.path()).is_err());
    }
}
