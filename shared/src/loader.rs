use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};

use libloading::Library;

use crate::core::LibraryLoader;
use crate::search_path::SearchPath;

/// Loads native libraries by name, resolved against the reconciled search
/// path. Handles are held for the life of the process so the libraries'
/// initialization stays visible to instrumentation installed afterwards.
#[derive(Debug, Default)]
pub struct DynamicLibraryLoader {
    search_path: SearchPath,
    held: Vec<Library>,
}

impl DynamicLibraryLoader {
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            held: Vec::new(),
        }
    }

    fn candidates(name: &str) -> [String; 3] {
        [
            format!("{name}{DLL_SUFFIX}"),
            format!("{DLL_PREFIX}{name}{DLL_SUFFIX}"),
            name.to_string(),
        ]
    }
}

impl LibraryLoader for DynamicLibraryLoader {
    fn load_library(&mut self, name: &str) -> Result<(), String> {
        let path = Self::candidates(name)
            .iter()
            .find_map(|candidate| self.search_path.resolve(candidate))
            .ok_or_else(|| format!("{name} was not found on the library search path"))?;

        // Loading runs the library's initialization code; that is the point
        // of preloading.
        let library = unsafe { Library::new(&path) }.map_err(|error| error.to_string())?;
        self.held.push(library);

        Ok(())
    }
}
