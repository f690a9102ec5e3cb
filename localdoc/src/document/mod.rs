use std::fmt;
use std::ops::Range;

use hcl_edit::structure::{Block, Body};

use crate::LOCALS_BLOCK;
use crate::parser::{ParseError, Parser};

/// A parsed HCL document that keeps every byte of its original formatting.
///
/// The source text is kept next to the parsed body. Rendering splices the
/// recorded replacements into that text, so bytes outside an edit (line
/// endings included) are never re-encoded.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) body: Body,
    source: String,
    edits: Vec<Edit>,
    /// Set when an edited value carried no source span; rendering then
    /// falls back to re-encoding the whole body.
    reencode: bool,
}

/// Replacement of `span` in the source with `text`.
#[derive(Debug, Clone)]
pub(crate) struct Edit {
    pub span: Range<usize>,
    pub text: String,
}

impl Document {
    pub(crate) fn new(body: Body, source: String) -> Self {
        Document {
            body,
            source,
            edits: Vec::new(),
            reencode: false,
        }
    }

    /// Decode raw file bytes and parse them.
    pub fn from_bytes(bytes: &[u8], file_id: usize) -> Result<Self, Vec<ParseError>> {
        let source = std::str::from_utf8(bytes)
            .map_err(|err| vec![ParseError::from_utf8(&err, bytes, file_id)])?;
        Parser::new(source.to_string(), file_id).parse()
    }

    /// Number of top-level `locals` blocks.
    pub fn locals_blocks(&self) -> usize {
        self.body.blocks().filter(|block| is_locals(block)).count()
    }

    /// Current text of the first local named `name`, without surrounding whitespace.
    pub fn get_local(&self, name: &str) -> Option<String> {
        self.body
            .blocks()
            .filter(|block| is_locals(block))
            .find_map(|block| block.body.get_attribute(name))
            .map(|attr| attr.value.to_string().trim().to_string())
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn record(&mut self, edit: Option<Edit>) {
        match edit {
            Some(edit) => self.edits.push(edit),
            None => self.reencode = true,
        }
    }
}

pub(crate) fn is_locals(block: &Block) -> bool {
    block.ident.as_str() == LOCALS_BLOCK
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reencode {
            return write!(f, "{}", self.body);
        }

        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        edits.sort_by_key(|edit| edit.span.start);

        let mut pos = 0;
        for edit in edits {
            f.write_str(&self.source[pos..edit.span.start])?;
            f.write_str(&edit.text)?;
            pos = edit.span.end;
        }
        f.write_str(&self.source[pos..])
    }
}
