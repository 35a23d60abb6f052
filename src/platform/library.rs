//! Native library loading
//!
//! The engine ships as a native library that has to be mapped into the
//! process before the host hands control to it.

use std::path::PathBuf;

use libloading::Library;
use tracing::debug;

/// Errors raised while loading a native library
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Native library `{name}` could not be loaded: {reason}")]
    LoadFailed { name: String, reason: String },
}

/// Collaborator that maps native libraries into the process
pub trait LibraryLoader {
    fn load_native_library(&mut self, name: &str) -> Result<(), LibraryError>;
}

/// [`LibraryLoader`] backed by the platform dynamic linker
///
/// Loaded libraries stay mapped for the loader's lifetime; the engine's
/// native state is never unloaded in-process.
#[derive(Debug, Default)]
pub struct DynamicLibraryLoader {
    search_dirs: Vec<PathBuf>,
    loaded: Vec<(String, Library)>,
}

impl DynamicLibraryLoader {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            loaded: Vec::new(),
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|(n, _)| n == name)
    }

    /// Candidate paths in search order: configured directories, then the
    /// bare platform file name for the system search path.
    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let file_name = libloading::library_filename(name);
        let mut candidates: Vec<PathBuf> = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .filter(|path| path.is_file())
            .collect();
        candidates.push(PathBuf::from(file_name));
        candidates
    }
}

impl LibraryLoader for DynamicLibraryLoader {
    fn load_native_library(&mut self, name: &str) -> Result<(), LibraryError> {
        if self.is_loaded(name) {
            return Ok(());
        }

        let mut last_error = String::from("no candidate paths");
        for candidate in self.candidates(name) {
            // SAFETY: loading runs the library's initialisers; the engine and
            // pre-loader libraries are trusted parts of the installation.
            match unsafe { Library::new(&candidate) } {
                Ok(library) => {
                    debug!("Loaded native library {} from {}", name, candidate.display());
                    self.loaded.push((name.to_string(), library));
                    return Ok(());
                }
                Err(e) => last_error = e.to_string(),
            }
        }

        Err(LibraryError::LoadFailed {
            name: name.to_string(),
            reason: last_error,
        })
    }
}
