use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};

/// Somewhere a named blob can be persisted
pub trait OutputSink {
    /// Write or overwrite `name` with `content`
    fn persist(&mut self, name: &str, content: &[u8]) -> Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn persist(&mut self, name: &str, content: &[u8]) -> Result<()> {
        (**self).persist(name, content)
    }
}

/// Writes outputs as files in a directory
pub struct FileOutput {
    base_dir: PathBuf,
}

impl FileOutput {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl OutputSink for FileOutput {
    fn persist(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(name);
        trace!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(&path, content).map_err(|source| Error::PersistFailed {
            name: name.to_string(),
            source,
        })
    }
}
