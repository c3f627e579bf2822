//! Directory-backed image store.

use marga::ImageStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Images stored as plain files in one directory.
///
/// Writes go to a `.part` file first and are renamed into place, so an
/// interrupted write never looks like a finished image on the next run.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open (creating if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ImageStore for DirectoryStore {
    fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn save(&mut self, name: &str, image: &[u8]) -> io::Result<()> {
        let target = self.path_of(name);
        let partial = self.root.join(format!("{}.part", name));
        fs::write(&partial, image)?;
        fs::rename(&partial, &target)
    }
}
