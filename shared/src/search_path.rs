use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::configuration::Settings;

/// Ordered list of directories consulted when resolving a library name.
/// Built once at startup and treated as read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Prepends a directory unless it is already present. Returns whether
    /// the directory was added.
    pub fn prepend(&mut self, dir: PathBuf) -> bool {
        if self.dirs.contains(&dir) {
            return false;
        }
        self.dirs.insert(0, dir);
        true
    }

    /// Makes every `gems/*/lib` directory under the configured package root
    /// visible on the search path, in case earlier environment hooks were
    /// ignored. Returns the number of directories added; enumeration
    /// failures leave the existing paths untouched.
    pub fn reconcile(&mut self, settings: &Settings) -> usize {
        let Some(root) = settings.package_root() else {
            return 0;
        };

        match library_dirs(&root) {
            Ok(dirs) => dirs.into_iter().filter(|dir| self.prepend(dir.clone())).count(),
            // fall through; errors will surface later if libraries are missing
            Err(_) => 0,
        }
    }

    /// The first directory containing `file_name`, in path order.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.exists())
    }
}

fn library_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root.join("gems"))?.flatten() {
        let lib = entry.path().join("lib");
        if lib.is_dir() {
            dirs.push(lib);
        }
    }
    dirs.sort();
    Ok(dirs)
}
