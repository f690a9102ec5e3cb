use std::fs::{self, File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{EditError, IoOp};

/// A document opened for editing, with its full contents loaded.
///
/// The handle is opened read+write so an unwritable file fails before any
/// parsing is attempted. The path is resolved through symlinks, so writes
/// land on the real file rather than replacing the link.
#[derive(Debug)]
pub struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) file: File,
    pub(crate) contents: Vec<u8>,
}

impl SourceFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EditError> {
        let path = fs::canonicalize(path.as_ref())
            .map_err(EditError::io(IoOp::Open, path.as_ref()))?;
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(EditError::io(IoOp::Open, &path))?;

        let mut contents = Vec::new();
        let bytes = file
            .read_to_end(&mut contents)
            .map_err(EditError::io(IoOp::Read, &path))?;
        tracing::debug!(path = %path.display(), bytes, "loaded document");

        Ok(SourceFile {
            path,
            file,
            contents,
        })
    }

    /// Resolved path of the file being edited.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}
