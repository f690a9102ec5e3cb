use std::io;
use std::path::PathBuf;

use localdoc::ParseError;

/// Process exit code for an I/O failure.
pub const EXIT_IO: i32 = 3;
/// Process exit code for a document that does not parse.
pub const EXIT_PARSE: i32 = 4;
/// Process exit code for a missing local when the caller asked to fail on it.
pub const EXIT_NOT_FOUND: i32 = 5;

/// File operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Open,
    Read,
    Seek,
    Write,
    Truncate,
    Persist,
}

impl std::fmt::Display for IoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            IoOp::Open => "open",
            IoOp::Read => "read",
            IoOp::Seek => "seek",
            IoOp::Write => "write",
            IoOp::Truncate => "truncate",
            IoOp::Persist => "replace",
        };
        f.write_str(op)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("cannot {op} '{}': {source}", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse '{}': {}", path.display(), summary(errors))]
    Parse {
        path: PathBuf,
        /// Source text as read, for rendering diagnostics.
        source_text: String,
        errors: Vec<ParseError>,
    },
}

impl EditError {
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| EditError::Io { op, path, source }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            EditError::Io { .. } => EXIT_IO,
            EditError::Parse { .. } => EXIT_PARSE,
        }
    }
}

fn summary(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
