pub mod document;
pub mod locals;
pub mod parser;

pub use document::Document;
pub use locals::{LocalMatch, MatchMode, Update, update_local};
pub use parser::{ParseError, Parser};

/// Block type whose attributes are eligible for replacement.
pub const LOCALS_BLOCK: &str = "locals";
