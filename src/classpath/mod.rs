//! Class sources: enumerate `.class` resources under a directory tree or a
//! jar archive and hand back raw bytes on demand.
//!
//! Unreadable or undecodable resources are logged and skipped; a bad class
//! never aborts the run.

mod directory;
mod jar;

pub use directory::DirectoryRoot;
pub use jar::JarRoot;

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::classfile::{read_class, ClassDecl};

/// A root that can list class resources and read them individually.
pub trait ClasspathRoot {
    /// Relative, slash-separated resource names ending in `.class`, in a
    /// stable order. Nested-class resources (names containing `$`) are
    /// excluded.
    fn class_resources(&self) -> Result<Vec<String>>;

    /// Raw bytes of one resource.
    fn read_resource(&self, name: &str) -> Result<Vec<u8>>;
}

/// Pick a root implementation from the path: `.jar`/`.zip` archives get a
/// [`JarRoot`], everything else is treated as a directory tree.
pub fn open_root(path: &Path) -> Result<Box<dyn ClasspathRoot>> {
    let is_archive = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip"));
    if is_archive {
        Ok(Box::new(JarRoot::open(path)?))
    } else {
        anyhow::ensure!(
            path.is_dir(),
            "class source {} is neither a directory nor a jar",
            path.display()
        );
        Ok(Box::new(DirectoryRoot::new(path)))
    }
}

/// Decode every class under the root, keeping only classes inside the
/// package prefix and dropping enum-derived classes. Per-resource failures
/// are warnings, not errors.
pub fn load_class_decls(root: &dyn ClasspathRoot, prefix: &str) -> Result<Vec<ClassDecl>> {
    let mut decls = Vec::new();
    for resource in root
        .class_resources()
        .context("failed to enumerate class resources")?
    {
        let bytes = match root.read_resource(&resource) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read {resource}: {err}");
                continue;
            }
        };
        match read_class(&bytes) {
            Ok(decl) if decl.is_enum_derived() => {
                debug!("skipping enum-derived class {}", decl.name);
            }
            Ok(decl) if !decl.name.starts_with(prefix) => {
                debug!("skipping {} outside package prefix", decl.name);
            }
            Ok(decl) => {
                debug!("found {}", decl.name.replace('/', "."));
                decls.push(decl);
            }
            Err(err) => {
                warn!("failed to decode {resource}: {err}");
            }
        }
    }
    Ok(decls)
}

/// Shared resource-name filter for both root kinds.
pub(crate) fn is_class_resource(name: &str) -> bool {
    name.ends_with(".class") && !name.contains('$')
}
