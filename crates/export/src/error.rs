//! Export Parsing Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An export parsing error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The export XML is too broken to process. Fatal: there is no
    /// post-level recovery from a document that does not parse.
    #[display("malformed export document: {_0}")]
    MalformedDocument(#[error(not(source))] String),
    /// The document parsed but does not look like a WordPress export.
    #[display("export document has no channel element")]
    MissingChannel,
    /// A required field could not be found on an item.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}
