use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::{Files, Location, SimpleFile};

/// Parse errors with source location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub severity: Severity,
    pub notes: Vec<String>,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
}

impl ParseError {
    pub fn error(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            message: message.into(),
            span,
            file_id,
            severity: Severity::Error,
            notes: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub(crate) fn from_hcl(err: &hcl_edit::parser::Error, source: &str, file_id: usize) -> Self {
        let location = err.location();
        let span = point_span(source, location.offset());
        ParseError::error(err.message(), span, file_id)
            .at(location.line(), location.column())
            .with_note(format!("in line: {}", err.line().trim_end()))
    }

    /// Reports bytes that are not valid UTF-8 at the first offending byte.
    pub(crate) fn from_utf8(err: &std::str::Utf8Error, bytes: &[u8], file_id: usize) -> Self {
        let offset = err.valid_up_to();
        let prefix = String::from_utf8_lossy(&bytes[..offset]);
        let location = SimpleFile::new("", prefix.as_ref())
            .location((), offset)
            .unwrap_or(Location {
                line_number: 1,
                column_number: 1,
            });
        let end = offset + err.error_len().unwrap_or(1);
        ParseError::error("invalid UTF-8 sequence", offset..end.min(bytes.len()), file_id)
            .at(location.line_number, location.column_number)
            .with_note("HCL documents must be UTF-8 encoded")
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(self.severity)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// One-character span at `offset`, clamped to the source and to a char boundary.
fn point_span(source: &str, offset: usize) -> Range<usize> {
    let start = offset.min(source.len());
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}
