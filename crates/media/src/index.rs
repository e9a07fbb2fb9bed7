//! The attachment index: a two-key lookup from attachment identity (source
//! URL or attachment ID) to a verified local media path.
//!
//! The index is built once per conversion run from the export's attachment
//! records and then extended lazily as gallery/image rewriting discovers
//! mappings the records alone could not provide. It is never shared across
//! runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use time::Date;
use tracing::instrument;
use unpress_export::models::AttachmentRecord;
use unpress_export::url::upload_date_of;
use walkdir::WalkDir;

/// Two key spaces (source URL, attachment ID) pointing at the same resolved
/// filesystem path.
///
/// Invariant: a key is only ever bound to a path that existed on disk at the
/// moment it was bound, either during [`build`](Self::build) or when a
/// secondary lookup [`discover`](Self::discover)ed it mid-run.
#[derive(Debug)]
pub struct MediaIndex {
    root: PathBuf,
    by_url: HashMap<String, PathBuf>,
    by_id: HashMap<String, PathBuf>,
}

impl MediaIndex {
    /// Builds the index by probing the media tree for every attachment
    /// record.
    ///
    /// For records whose URL embeds a `/YYYY/MM/` upload date, an ordered
    /// candidate list is probed first: `<root>/YYYY/MM/<file>`,
    /// `<root>/YYYY-MM/<file>`, `<root>/YYYY/<file>`. Records that miss all
    /// candidates (or have no date segment) fall back to an exhaustive walk
    /// of the media root. Records that still miss are left out of the index;
    /// rewriting may resolve them later through secondary strategies.
    #[instrument(skip_all, fields(root = %root.as_ref().display(), records = records.len()))]
    pub fn build(root: impl AsRef<Path>, records: &[AttachmentRecord]) -> Self {
        let mut index =
            Self { root: root.as_ref().to_path_buf(), by_url: HashMap::new(), by_id: HashMap::new() };
        for record in records {
            if record.filename.is_empty() {
                continue;
            }
            match index.probe_record(record) {
                Some(path) => index.bind(Some(&record.id), Some(&record.source_url), path),
                None => tracing::debug!(
                    attachment = %record.id,
                    filename = %record.filename,
                    "Attachment not found under the media root"
                ),
            }
        }
        index
    }

    /// The media root this index probes against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_url(&self, url: &str) -> Option<&Path> {
        self.by_url.get(url).map(PathBuf::as_path)
    }

    pub fn resolve_id(&self, id: &str) -> Option<&Path> {
        self.by_id.get(id).map(PathBuf::as_path)
    }

    /// Records a mapping discovered during rewriting so later references to
    /// the same attachment resolve without repeating the search.
    ///
    /// The caller must have verified the path on disk; every discovery comes
    /// out of a filesystem probe, so this holds by construction.
    pub fn discover(&mut self, id: Option<&str>, url: Option<&str>, path: &Path) {
        debug_assert!(path.is_file(), "discovered mapping must point at an existing file");
        self.bind(id, url, path.to_path_buf());
    }

    /// Walks the entire media root for an exact filename match.
    ///
    /// Siblings are visited in name order, so duplicate filenames across
    /// directories resolve deterministically to the first match — which is
    /// not necessarily the *right* one. Known limitation.
    pub fn locate_by_filename(&self, filename: &str) -> Option<PathBuf> {
        walk_for(&self.root, filename)
    }

    /// Date-windowed search for a bare filename, keyed on the post's publish
    /// date: the `YYYY/MM` subtree first, then the `YYYY` subtree, then the
    /// whole root. First match wins.
    pub fn locate_near_date(&self, filename: &str, date: Date) -> Option<PathBuf> {
        let year = self.root.join(format!("{:04}", date.year()));
        let month = year.join(format!("{:02}", u8::from(date.month())));
        [month, year, self.root.clone()]
            .into_iter()
            .filter(|base| base.is_dir())
            .find_map(|base| walk_for(&base, filename))
    }

    fn probe_record(&self, record: &AttachmentRecord) -> Option<PathBuf> {
        if let Some((year, month)) = upload_date_of(&record.source_url) {
            let candidates = [
                self.root.join(&year).join(&month).join(&record.filename),
                self.root.join(format!("{year}-{month}")).join(&record.filename),
                self.root.join(&year).join(&record.filename),
            ];
            if let Some(hit) = candidates.into_iter().find(|candidate| candidate.is_file()) {
                return Some(hit);
            }
        }
        self.locate_by_filename(&record.filename)
    }

    fn bind(&mut self, id: Option<&str>, url: Option<&str>, path: PathBuf) {
        if let Some(url) = url {
            self.by_url.insert(url.to_string(), path.clone());
        }
        if let Some(id) = id {
            self.by_id.insert(id.to_string(), path);
        }
    }
}

fn walk_for(base: &Path, filename: &str) -> Option<PathBuf> {
    WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.file_name().to_str() == Some(filename))
        .map(walkdir::DirEntry::into_path)
}
