//! Conversion Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use std::path::PathBuf;

use derive_more::{Display, Error};

/// A conversion error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// A variant surfacing from [`convert_post`](crate::Converter::convert_post)
/// skips that post only; the batch always continues.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The built-in front-matter template failed to compile.
    #[display("front matter template is invalid")]
    Template,
    /// Front matter could not be rendered for a post.
    #[display("failed to render front matter")]
    FrontMatter,
    /// A publish date could not be rendered into text.
    #[display("failed to format a publish date")]
    DateFormat,
    /// The output directory could not be created.
    #[display("failed to create output directory {}", _0.display())]
    CreateDir(#[error(not(source))] PathBuf),
    /// The converted post could not be written.
    #[display("failed to write converted post to {}", _0.display())]
    Write(#[error(not(source))] PathBuf),
}
