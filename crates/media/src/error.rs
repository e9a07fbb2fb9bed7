//! Media Localization Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use std::path::PathBuf;

use derive_more::{Display, Error};

/// A media localization error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every variant here is per-file and non-fatal to a conversion run: the
/// caller leaves the affected reference unresolved and carries on.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dated image directory could not be created.
    #[display("failed to create image directory {}", _0.display())]
    CreateDir(#[error(not(source))] PathBuf),
    /// The resolved file could not be copied into the output tree.
    #[display("failed to copy {} to {}", from.display(), to.display())]
    Copy { from: PathBuf, to: PathBuf },
    /// The resolved path unexpectedly has no final component.
    #[display("source path has no filename: {}", _0.display())]
    MissingFilename(#[error(not(source))] PathBuf),
    /// The post date could not be rendered into a directory name.
    #[display("failed to format image directory date")]
    DateFormat,
}
