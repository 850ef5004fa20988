use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Write `content` to `path`, creating parent directories first.
///
/// The file is flushed to disk before returning. Returns the number of bytes
/// written.
pub fn write_file(path: impl AsRef<Path>, content: &[u8]) -> Result<usize> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
    file.write_all(content).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(content.len())
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
    content: Vec<u8>,
}

impl OutputFile {
    /// Create a new output file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file to disk.
    pub fn write(&self) -> Result<usize> {
        write_file(&self.path, &self.content)
    }
}
