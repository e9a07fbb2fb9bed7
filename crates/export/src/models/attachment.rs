use std::collections::HashMap;

use crate::url::filename_from_url;

/// A media attachment record from the export document.
///
/// Immutable once parsed: the record describes where the source platform
/// hosted the file, not where (or whether) it exists locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRecord {
    /// WordPress attachment ID.
    pub id: String,
    /// ID of the post this attachment belongs to, when it has one.
    pub parent: Option<String>,
    /// Absolute URL the file was served from.
    pub source_url: String,
    /// Percent-decoded basename of `source_url`.
    pub filename: String,
}

impl AttachmentRecord {
    pub fn new(id: impl Into<String>, parent: Option<String>, source_url: impl Into<String>) -> Self {
        let source_url = source_url.into();
        let filename = filename_from_url(&source_url).unwrap_or_default();
        Self { id: id.into(), parent, source_url, filename }
    }
}

/// Mapping from post ID to the ordered attachment IDs that declare that post
/// as their parent. Built once per run, read-only afterwards.
#[derive(Debug, Default)]
pub struct PostAttachments {
    by_post: HashMap<String, Vec<String>>,
}

impl PostAttachments {
    /// Builds the mapping in document order, so a gallery shortcode without
    /// an explicit ID list renders attachments in export order.
    pub fn from_records(records: &[AttachmentRecord]) -> Self {
        let mut by_post: HashMap<String, Vec<String>> = HashMap::new();
        for record in records {
            if let Some(parent) = &record.parent {
                by_post.entry(parent.clone()).or_default().push(record.id.clone());
            }
        }
        Self { by_post }
    }

    /// The ordered attachment IDs belonging to `post_id` (empty when none).
    pub fn for_post(&self, post_id: &str) -> &[String] {
        self.by_post.get(post_id).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>) -> AttachmentRecord {
        AttachmentRecord::new(id, parent.map(String::from), format!("https://files.wordpress.com/2015/03/{id}.jpg"))
    }

    #[test]
    fn test_filename_is_derived_from_url() {
        let record = AttachmentRecord::new("3", None, "https://files.wordpress.com/2015/03/sun%20set.jpg");
        assert_eq!(record.filename, "sun set.jpg");
    }

    #[test]
    fn test_attachments_grouped_by_parent_in_order() {
        let records = [record("4", Some("7")), record("9", None), record("3", Some("7")), record("5", Some("8"))];
        let map = PostAttachments::from_records(&records);
        assert_eq!(map.for_post("7"), ["4".to_string(), "3".to_string()]);
        assert_eq!(map.for_post("8"), ["5".to_string()]);
        assert!(map.for_post("9").is_empty());
    }
}
