use std::path::PathBuf;

use localdoc::{Document, LocalMatch, MatchMode, update_local};

use crate::error::EditError;
use crate::source::SourceFile;
use crate::writer::{self, WriteMode};

/// One edit: set local `name` in the document at `path` to the string `value`.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub path: PathBuf,
    pub name: String,
    pub value: String,
    pub match_mode: MatchMode,
    pub write_mode: WriteMode,
}

impl EditRequest {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, value: impl Into<String>) -> Self {
        EditRequest {
            path: path.into(),
            name: name.into(),
            value: value.into(),
            match_mode: MatchMode::default(),
            write_mode: WriteMode::default(),
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}

/// What a successful run did to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The local was rewritten at least once and the file saved.
    Updated { matches: Vec<LocalMatch> },
    /// No `locals` block defines the name; the file was not touched.
    NotFound,
}

/// Read, parse, update and save. Stops at the first failure.
pub fn run(request: &EditRequest) -> Result<Outcome, EditError> {
    let span = tracing::info_span!(
        "update_local",
        path = %request.path.display(),
        local = %request.name,
    );
    let _enter = span.enter();

    let source = SourceFile::open(&request.path)?;

    let mut doc = match Document::from_bytes(source.contents(), 0) {
        Ok(doc) => doc,
        Err(errors) => {
            return Err(EditError::Parse {
                path: source.path().to_path_buf(),
                source_text: String::from_utf8_lossy(source.contents()).into_owned(),
                errors,
            });
        }
    };

    if doc.locals_blocks() == 0 {
        tracing::warn!("document has no locals blocks");
    }

    let update = update_local(&mut doc, &request.name, &request.value, request.match_mode);
    if !update.found() {
        return Ok(Outcome::NotFound);
    }
    tracing::debug!(current = ?doc.get_local(&request.name), "value after update");

    writer::save(source, &doc, request.write_mode)?;
    tracing::info!(%update, "local updated");

    Ok(Outcome::Updated {
        matches: update.matches,
    })
}
