//! Copying resolved media into the date-partitioned output tree.

use std::fs;
use std::path::{Path, PathBuf};

use exn::{OptionExt, ResultExt};
use time::Date;
use tracing::instrument;
use unpress_export::models::DATE_FORMAT;

use crate::error::{ErrorKind, Result};

/// The outcome of localizing one media file: where the copy landed and the
/// canonical site-relative URL that now references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub local_path: PathBuf,
    pub site_url: String,
}

/// Copies resolved media files into `<images_root>/<YYYY-MM-DD>/` and hands
/// back their `/images/<YYYY-MM-DD>/<filename>` site URLs.
#[derive(Debug)]
pub struct Localizer {
    images_root: PathBuf,
}

impl Localizer {
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        Self { images_root: images_root.into() }
    }

    /// Copies `source` into the dated image directory for `date`.
    ///
    /// Directory creation is idempotent and an existing copy of the same
    /// filename is silently overwritten, so re-running a migration converges
    /// on the same output tree.
    ///
    /// # Errors
    ///
    /// All failures here are per-file: the caller leaves the affected
    /// reference unresolved and continues with the rest of the post.
    #[instrument(skip(self), fields(source = %source.display()))]
    pub fn localize(&self, source: &Path, date: Date) -> Result<ResolvedMedia> {
        let day = date.format(&DATE_FORMAT).or_raise(|| ErrorKind::DateFormat)?;
        let filename = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_raise(|| ErrorKind::MissingFilename(source.to_path_buf()))?;

        let target_dir = self.images_root.join(&day);
        fs::create_dir_all(&target_dir).or_raise(|| ErrorKind::CreateDir(target_dir.clone()))?;
        let target = target_dir.join(filename);
        fs::copy(source, &target).or_raise(|| ErrorKind::Copy { from: source.to_path_buf(), to: target.clone() })?;
        tracing::debug!(target = %target.display(), "Copied media file");

        Ok(ResolvedMedia { local_path: target, site_url: format!("/images/{day}/{filename}") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_copies_into_dated_directory() {
        let media = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let source = media.path().join("sunset.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let localizer = Localizer::new(out.path());
        let resolved = localizer.localize(&source, date!(2015 - 03 - 02)).unwrap();
        assert_eq!(resolved.site_url, "/images/2015-03-02/sunset.jpg");
        assert_eq!(resolved.local_path, out.path().join("2015-03-02/sunset.jpg"));
        assert!(resolved.local_path.is_file());
    }

    #[test]
    fn test_repeat_localization_overwrites_in_place() {
        let media = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let source = media.path().join("sunset.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let localizer = Localizer::new(out.path());
        let first = localizer.localize(&source, date!(2015 - 03 - 02)).unwrap();
        std::fs::write(&source, b"jpeg-v2").unwrap();
        let second = localizer.localize(&source, date!(2015 - 03 - 02)).unwrap();

        assert_eq!(first.local_path, second.local_path);
        assert_eq!(std::fs::read(&second.local_path).unwrap(), b"jpeg-v2");
        // Exactly one file in the dated directory: overwrite, not duplicate.
        assert_eq!(std::fs::read_dir(out.path().join("2015-03-02")).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_source_is_a_per_file_error() {
        let out = tempfile::tempdir().unwrap();
        let localizer = Localizer::new(out.path());
        let error = localizer.localize(Path::new("/nonexistent/gone.jpg"), date!(2015 - 03 - 02)).unwrap_err();
        assert!(matches!(&*error, ErrorKind::Copy { .. }));
    }
}
