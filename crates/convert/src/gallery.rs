//! Gallery span extraction and rewriting over the raw post content.
//!
//! Two incompatible encodings are handled, each replaced in isolation: the
//! tiled/block structured comment and the legacy `[gallery]` shortcode.
//! Every occurrence is captured together with the exact byte range it
//! occupies, so replacement is positional; a duplicate literal span
//! elsewhere in the document cannot be misdirected.

use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

use time::Date;
use tracing::instrument;
use unpress_export::models::{Post, PostAttachments};
use unpress_export::url::filename_from_url;
use unpress_media::{Localizer, MediaIndex};

use crate::consts;

/// Which of the two gallery encodings produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GalleryEncoding {
    Tiled,
    Legacy,
}

/// One gallery occurrence: the byte span it occupies in the content and the
/// ordered attachment IDs it declares. Ephemeral, derived per post.
#[derive(Debug)]
pub(crate) struct GalleryReference {
    pub encoding: GalleryEncoding,
    pub span: Range<usize>,
    pub attachment_ids: Vec<String>,
}

/// Finds every gallery occurrence in `content`, in position order.
///
/// A legacy shortcode without an explicit `ids` attribute defaults to all
/// attachments parented to the post; when the post has none either, the
/// reference carries an empty ID list and renders as an empty container.
pub(crate) fn find_galleries(content: &str, post_id: &str, attachments: &PostAttachments) -> Vec<GalleryReference> {
    let mut galleries = Vec::new();
    for captures in consts::TILED_GALLERY_REGEX.captures_iter(content) {
        let whole = captures.get(0).unwrap();
        let ids = split_ids(captures.get(1).map(|m| m.as_str()).unwrap_or_default());
        galleries.push(GalleryReference { encoding: GalleryEncoding::Tiled, span: whole.range(), attachment_ids: ids });
    }
    for captures in consts::GALLERY_SHORTCODE_REGEX.captures_iter(content) {
        let whole = captures.get(0).unwrap();
        let attrs = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let ids = match consts::GALLERY_IDS_REGEX.captures(attrs) {
            Some(ids) => split_ids(ids.get(1).unwrap().as_str()),
            None => attachments.for_post(post_id).to_vec(),
        };
        galleries.push(GalleryReference { encoding: GalleryEncoding::Legacy, span: whole.range(), attachment_ids: ids });
    }
    galleries.sort_by_key(|gallery| gallery.span.start);
    galleries
}

/// Replaces every gallery occurrence in the post content with an ordered
/// image container, localizing each resolved attachment along the way.
///
/// Attachment IDs that fail every resolution strategy are dropped from the
/// emitted container with a diagnostic; the remaining images keep the
/// declared order.
#[instrument(skip_all, fields(post = %post.id))]
pub(crate) fn rewrite_galleries(
    post: &Post,
    attachments: &PostAttachments,
    index: &mut MediaIndex,
    localizer: &Localizer,
) -> String {
    let content = post.content.as_str();
    let galleries = find_galleries(content, &post.id, attachments);
    if galleries.is_empty() {
        return content.to_string();
    }
    // Attachment IDs named by generated image markup elsewhere in the post,
    // for the secondary resolution strategy. Scanned once, off the original
    // content, before any span is replaced.
    let markers = image_markers(content);
    let date = post.date.date();

    let mut rewritten = content.to_string();
    // Back to front, so earlier byte ranges stay valid.
    for gallery in galleries.iter().rev() {
        let html = render_gallery(gallery, &markers, index, localizer, date);
        rewritten.replace_range(gallery.span.clone(), &html);
    }
    rewritten
}

/// Maps attachment IDs to the source URLs their generated `wp-image-<id>`
/// markup carries. First occurrence wins.
fn image_markers(content: &str) -> HashMap<String, String> {
    let mut markers = HashMap::new();
    for captures in consts::WP_IMAGE_MARKER_REGEX.captures_iter(content) {
        let (Some(id), Some(url)) = (captures.get(1), captures.get(2)) else { continue };
        markers.entry(id.as_str().to_string()).or_insert_with(|| url.as_str().to_string());
    }
    markers
}

fn render_gallery(
    gallery: &GalleryReference,
    markers: &HashMap<String, String>,
    index: &mut MediaIndex,
    localizer: &Localizer,
    date: Date,
) -> String {
    let mut html = String::from("<div class=\"gallery\">\n");
    for id in &gallery.attachment_ids {
        let Some(path) = resolve_attachment(id, markers, index) else {
            tracing::warn!(attachment = %id, encoding = ?gallery.encoding, "Gallery attachment unresolved; dropping it");
            continue;
        };
        match localizer.localize(&path, date) {
            Ok(media) => {
                let alt = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
                html.push_str(&format!("<img src=\"{}\" alt=\"{alt}\" />\n", media.site_url));
            },
            Err(e) => tracing::warn!(attachment = %id, error = ?e, "Failed to copy gallery image"),
        }
    }
    html.push_str("</div>");
    html
}

/// Primary resolution by attachment ID, then the secondary strategy: a
/// generated-markup marker associates the ID with a source URL, whose bare
/// filename is searched for across the media root. Discoveries are inserted
/// into the index for reuse within the run.
fn resolve_attachment(id: &str, markers: &HashMap<String, String>, index: &mut MediaIndex) -> Option<PathBuf> {
    if let Some(path) = index.resolve_id(id) {
        return Some(path.to_path_buf());
    }
    let url = markers.get(id)?;
    let filename = filename_from_url(url)?;
    let path = index.locate_by_filename(&filename)?;
    index.discover(Some(id), Some(url), &path);
    Some(path)
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.replace(['"', ' '], "").split(',').filter(|id| !id.is_empty()).map(String::from).collect()
}
