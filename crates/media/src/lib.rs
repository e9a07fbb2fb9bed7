//! Attachment resolution and media localization.
//!
//! [`MediaIndex`] maps attachment identity (source URL or attachment ID) to
//! verified paths under the media root, with date-probe and directory-walk
//! fallback strategies. [`Localizer`] copies resolved files into the
//! date-partitioned output tree and produces their site-relative URLs.

pub mod error;
mod index;
mod localize;

pub use crate::index::MediaIndex;
pub use crate::localize::{Localizer, ResolvedMedia};
