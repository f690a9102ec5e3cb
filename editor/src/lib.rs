pub mod error;
pub mod executor;
pub mod source;
pub mod writer;

pub use error::EditError;
pub use executor::{EditRequest, Outcome, run};
pub use localdoc::MatchMode;
pub use source::SourceFile;
pub use writer::WriteMode;
