// Export modules for library usage
pub mod analysis;
pub mod classfile;
pub mod classpath;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod output;
pub mod stats;

// Re-export commonly used types
pub use crate::analysis::{apply_visibility, classify_class, resolve_usage, Detector};
pub use crate::classfile::{read_class, ClassDecl, MemberDecl, UsageEvent};
pub use crate::classpath::{load_class_decls, open_root, ClasspathRoot, DirectoryRoot, JarRoot};
pub use crate::config::DetectorConfig;
pub use crate::core::{Category, ClassRecord, NodeKind, Registry, Visibility};
pub use crate::errors::ClassReadError;
pub use crate::output::{node_label, style, NodeStyle};
pub use crate::stats::Stats;
