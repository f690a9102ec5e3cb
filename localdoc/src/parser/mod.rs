pub mod error;

pub use error::ParseError;

use crate::document::Document;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse the source into a format-preserving Document.
    pub fn parse(&self) -> Result<Document, Vec<ParseError>> {
        let body = hcl_edit::parser::parse_body(&self.source)
            .map_err(|err| vec![ParseError::from_hcl(&err, &self.source, self.file_id)])?;
        tracing::debug!(
            file_id = self.file_id,
            bytes = self.source.len(),
            "parsed document"
        );
        Ok(Document::new(body, self.source.clone()))
    }
}
