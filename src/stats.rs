//! Pass 5: statistics aggregation.
//!
//! Counts are gathered over the finalized registry: classes read, classes
//! drawn, drawn classes per rendering kind, and per-kind "user" counts.
//! The user counts tally drawn edge endpoints by the target's kind, so a
//! class using two drawn singletons contributes two to the singleton-user
//! count.

use serde::Serialize;

use crate::config::DetectorConfig;
use crate::core::{NodeKind, Registry};

#[derive(Clone, Debug, Default, Serialize)]
pub struct Stats {
    pub classes_read: usize,
    pub classes_drawn: usize,
    pub singletons: usize,
    pub hingletons: usize,
    pub mingletons: usize,
    pub fingletons: usize,
    pub singleton_users: usize,
    pub hingleton_users: usize,
    pub mingleton_users: usize,
    pub fingleton_users: usize,
}

impl Stats {
    pub fn record_class_read(&mut self) {
        self.classes_read += 1;
    }

    /// Aggregate over the registry once visibility is final.
    pub fn gather(&mut self, registry: &Registry) {
        for rec in registry.iter().filter(|r| r.is_drawn()) {
            self.classes_drawn += 1;
            match rec.kind() {
                NodeKind::Singleton => self.singletons += 1,
                NodeKind::Hingleton => self.hingletons += 1,
                NodeKind::Mingleton => self.mingletons += 1,
                NodeKind::Fingleton => self.fingletons += 1,
                NodeKind::Other => {}
            }
            for target in &rec.uses {
                let Some(target_rec) = registry.get(target) else {
                    continue;
                };
                if !target_rec.is_drawn() {
                    continue;
                }
                match target_rec.kind() {
                    NodeKind::Singleton => self.singleton_users += 1,
                    NodeKind::Hingleton => self.hingleton_users += 1,
                    NodeKind::Mingleton => self.mingleton_users += 1,
                    NodeKind::Fingleton => self.fingleton_users += 1,
                    NodeKind::Other => {}
                }
            }
        }
    }

    /// Multi-line summary; lines for disabled categories are omitted
    /// entirely. `pad` right-justifies counts to four columns.
    pub fn render(&self, config: &DetectorConfig, pad: bool) -> String {
        let width = if pad { 4 } else { 0 };
        let mut out = format!(
            "Classes drawn: {} of {}",
            self.classes_drawn, self.classes_read
        );
        if config.detect_singletons {
            out.push_str(&format!(
                "\nSingletons: {:>width$}     Singleton users: {:>width$}",
                self.singletons, self.singleton_users
            ));
        }
        if config.detect_hingletons {
            out.push_str(&format!(
                "\nHingletons: {:>width$}     Hingleton users: {:>width$}",
                self.hingletons, self.hingleton_users
            ));
        }
        if config.detect_mingletons {
            out.push_str(&format!(
                "\nMingletons: {:>width$}     Mingleton users: {:>width$}",
                self.mingletons, self.mingleton_users
            ));
        }
        if config.detect_fingletons {
            out.push_str(&format!(
                "\nFingletons: {:>width$}     Fingleton users: {:>width$}",
                self.fingletons, self.fingleton_users
            ));
        }
        out
    }
}
