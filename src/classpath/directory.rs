use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use super::{is_class_resource, ClasspathRoot};

/// Class source backed by a compiled-output directory tree.
pub struct DirectoryRoot {
    root: PathBuf,
}

impl DirectoryRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ClasspathRoot for DirectoryRoot {
    fn class_resources(&self) -> Result<Vec<String>> {
        let mut resources = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("failed to walk {}", self.root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walkdir yields paths under its root");
            let name = to_resource_name(relative);
            if is_class_resource(&name) {
                resources.push(name);
            }
        }
        Ok(resources)
    }

    fn read_resource(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Relative path to a slash-separated resource name, independent of the
/// platform separator.
fn to_resource_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
