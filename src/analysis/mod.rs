//! The five-pass analysis pipeline.
//!
//! Each pass runs to completion over the whole input set before the next
//! starts: classification fixes categories, usage resolution adds edges
//! between already-classified records, visibility is computed from the
//! finished edge set, and stats/export read the finalized registry.

pub mod classify;
pub mod usage;
pub mod visibility;

pub use classify::classify_class;
pub use usage::resolve_usage;
pub use visibility::apply_visibility;

use std::path::Path;

use anyhow::Result;
use log::info;

use crate::classfile::ClassDecl;
use crate::classpath;
use crate::config::DetectorConfig;
use crate::core::Registry;
use crate::output::graphml;
use crate::stats::Stats;

/// Strip the configured package prefix from a qualified class name.
pub(crate) fn strip_package_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// Pipeline driver: owns the registry and runs the passes in order.
pub struct Detector {
    registry: Registry,
    stats: Stats,
    config: DetectorConfig,
}

impl Detector {
    /// Enumerate and decode classes under a directory or jar, then analyze.
    pub fn from_root(path: &Path, prefix: &str, config: DetectorConfig) -> Result<Self> {
        let root = classpath::open_root(path)?;
        let decls = classpath::load_class_decls(root.as_ref(), prefix)?;
        Ok(Self::from_decls(&decls, prefix, config))
    }

    /// Analyze already-decoded declarations. This is the pure core; tests
    /// enter here.
    pub fn from_decls(decls: &[ClassDecl], prefix: &str, config: DetectorConfig) -> Self {
        info!("processing {} classes", decls.len());
        let mut registry = Registry::new();
        let mut stats = Stats::default();

        // Pass 1: classify every class and count it as read.
        for decl in decls {
            classify_class(&mut registry, decl, &config, prefix);
            stats.record_class_read();
        }

        // Pass 2: resolve usage edges against the finished classification.
        for decl in decls {
            resolve_usage(&mut registry, decl, &config, prefix);
        }

        // Passes 3-4: direct visibility, then a single propagation hop.
        apply_visibility(&mut registry, config.threshold);

        // Pass 5: aggregate statistics over the finalized registry.
        if config.show_stats || config.show_banner {
            stats.gather(&registry);
        }

        info!("done");
        Self {
            registry,
            stats,
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Serialize the drawn subgraph as a GraphML document.
    pub fn graphml(&self) -> String {
        graphml::render(&self.registry, &self.config, &self.stats)
    }

    /// Formatted statistics summary.
    pub fn stats_text(&self, pad: bool) -> String {
        self.stats.render(&self.config, pad)
    }
}
