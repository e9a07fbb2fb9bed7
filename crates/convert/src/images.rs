//! Inline image localization over the parsed content tree.

use std::path::PathBuf;

use scraper::{Html, Node};
use time::Date;
use tracing::instrument;
use unpress_export::url::filename_from_url;
use unpress_media::{Localizer, MediaIndex};

use crate::consts;
use crate::dom;

/// Site-relative prefix produced by localization; anything already under it
/// was handled by gallery rewriting and needs no further resolution.
const LOCAL_PREFIX: &str = "/images/";

/// Resolves and copies every individually-embedded image, rewriting its
/// `src` to the canonical site-relative path.
///
/// Resolution misses and copy failures leave the original `src` untouched
/// with a diagnostic: a broken reference is a defect surfaced to the
/// operator, not a crash.
#[instrument(skip_all)]
pub(crate) fn localize_images(fragment: &mut Html, date: Date, index: &mut MediaIndex, localizer: &Localizer) {
    let pending: Vec<_> = fragment
        .select(&consts::IMG_SELECTOR)
        .filter_map(|image| image.value().attr("src").map(|src| (image.id(), src.to_string())))
        .collect();

    for (node_id, src) in pending {
        if src.starts_with(LOCAL_PREFIX) {
            continue;
        }
        let Some(resolved) = resolve_src(&src, date, index) else {
            tracing::warn!(src = %src, "Image not found in any date-appropriate directory; keeping original reference");
            continue;
        };
        match localizer.localize(&resolved, date) {
            Ok(media) => {
                if let Some(mut node) = fragment.tree.get_mut(node_id)
                    && let Node::Element(element) = node.value()
                {
                    dom::set_attr(element, "src", &media.site_url);
                }
            },
            Err(e) => tracing::warn!(src = %src, error = ?e, "Failed to copy image; keeping original reference"),
        }
    }
}

/// URL lookup first; on a miss, a date-windowed search for the bare
/// filename keyed on the post's publish date (the URL may carry no date
/// segment at all). Discoveries are recorded for reuse within the run.
fn resolve_src(src: &str, date: Date, index: &mut MediaIndex) -> Option<PathBuf> {
    if let Some(path) = index.resolve_url(src) {
        return Some(path.to_path_buf());
    }
    let filename = filename_from_url(src)?;
    // Only names with an extension are plausibly media files.
    if !filename.contains('.') {
        return None;
    }
    let path = index.locate_near_date(&filename, date)?;
    index.discover(None, Some(src), &path);
    Some(path)
}
