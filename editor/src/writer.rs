use std::fs;
use std::io::{Seek, SeekFrom, Write};

use localdoc::Document;
use tempfile::NamedTempFile;

use crate::error::{EditError, IoOp};
use crate::source::SourceFile;

/// How the rewritten document replaces the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write a sibling temp file and rename it over the original.
    #[default]
    Atomic,
    /// Overwrite the open handle from offset 0 and truncate to the new length.
    InPlace,
}

/// Serialize `doc` into the file `source` was read from, consuming the handle.
pub fn save(source: SourceFile, doc: &Document, mode: WriteMode) -> Result<(), EditError> {
    let rendered = doc.to_string();
    match mode {
        WriteMode::Atomic => save_atomic(source, rendered.as_bytes()),
        WriteMode::InPlace => save_in_place(source, rendered.as_bytes()),
    }
}

fn save_in_place(source: SourceFile, bytes: &[u8]) -> Result<(), EditError> {
    let SourceFile { path, mut file, .. } = source;

    file.seek(SeekFrom::Start(0))
        .map_err(EditError::io(IoOp::Seek, &path))?;
    file.write_all(bytes)
        .map_err(EditError::io(IoOp::Write, &path))?;
    file.set_len(bytes.len() as u64)
        .map_err(EditError::io(IoOp::Truncate, &path))?;
    file.sync_all().map_err(EditError::io(IoOp::Write, &path))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "rewrote document in place");
    Ok(())
}

fn save_atomic(source: SourceFile, bytes: &[u8]) -> Result<(), EditError> {
    let SourceFile { path, file, .. } = source;

    let permissions = file
        .metadata()
        .map_err(EditError::io(IoOp::Read, &path))?
        .permissions();
    drop(file);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().map_err(EditError::io(IoOp::Write, &path))?,
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(EditError::io(IoOp::Write, &path))?;
    tmp.write_all(bytes)
        .map_err(EditError::io(IoOp::Write, tmp.path()))?;
    tmp.as_file()
        .sync_all()
        .map_err(EditError::io(IoOp::Write, tmp.path()))?;
    fs::set_permissions(tmp.path(), permissions)
        .map_err(EditError::io(IoOp::Write, tmp.path()))?;
    tmp.persist(&path)
        .map_err(|err| EditError::io(IoOp::Persist, &path)(err.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "replaced document");
    Ok(())
}
