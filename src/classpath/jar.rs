use std::cell::RefCell;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zip::ZipArchive;

use super::{is_class_resource, ClasspathRoot};

/// Class source backed by a jar (or any zip) archive.
pub struct JarRoot {
    path: PathBuf,
    // ZipArchive needs &mut for entry access.
    archive: RefCell<ZipArchive<File>>,
}

impl JarRoot {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let archive = ZipArchive::new(file)
            .with_context(|| format!("{} is not a readable archive", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive: RefCell::new(archive),
        })
    }
}

impl ClasspathRoot for JarRoot {
    fn class_resources(&self) -> Result<Vec<String>> {
        let archive = self.archive.borrow();
        let mut resources: Vec<String> = archive
            .file_names()
            .filter(|name| is_class_resource(name))
            .map(str::to_string)
            .collect();
        // Archive order is whatever the producer wrote; sort for stability.
        resources.sort();
        Ok(resources)
    }

    fn read_resource(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut entry = archive
            .by_name(name)
            .with_context(|| format!("{} not found in {}", name, self.path.display()))?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed to read {} from {}", name, self.path.display()))?;
        Ok(bytes)
    }
}
