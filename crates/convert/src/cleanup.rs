//! Platform markup cleanup on the parsed content tree.
//!
//! Source-platform image markup carries alignment/size classes, pixel
//! dimensions, and full-size-image link wrappers that are meaningless (or
//! broken) on the migrated site. Cleanup strips all of it and applies one
//! uniform presentation style instead.

use scraper::node::Element;
use scraper::{Html, Node};
use unpress_export::url::host_of;

use crate::consts;
use crate::dom;

pub(crate) fn normalize_images(fragment: &mut Html, media_hosts: &[String]) {
    let images: Vec<_> = fragment.select(&consts::IMG_SELECTOR).map(|image| image.id()).collect();
    for node_id in images {
        if let Some(mut node) = fragment.tree.get_mut(node_id)
            && let Node::Element(element) = node.value()
        {
            strip_platform_classes(element);
            // Source-platform dimensions and titles no longer apply.
            dom::remove_attr(element, "width");
            dom::remove_attr(element, "height");
            dom::remove_attr(element, "title");
            dom::set_attr(element, "style", consts::IMG_STYLE);
            if element.attr("alt").map(str::trim).unwrap_or_default().is_empty() {
                dom::set_attr(element, "alt", consts::DEFAULT_ALT);
            }
        }
    }
    unwrap_media_links(fragment, media_hosts);
}

fn strip_platform_classes(element: &mut Element) {
    let Some(class) = element.attr("class").map(str::to_string) else { return };
    let kept = class
        .split_whitespace()
        .filter(|token| !consts::PLATFORM_IMAGE_CLASSES.iter().any(|platform| token.contains(platform)))
        .collect::<Vec<_>>()
        .join(" ");
    if kept.is_empty() {
        dom::remove_attr(element, "class");
    } else {
        dom::set_attr(element, "class", &kept);
    }
}

/// Unwraps (removes, keeping children) any link element directly wrapping an
/// image when its target host is one of the source media hosts: those links
/// pointed at full-size originals that no longer exist there.
fn unwrap_media_links(fragment: &mut Html, media_hosts: &[String]) {
    let mut anchors = Vec::new();
    for image in fragment.select(&consts::IMG_SELECTOR) {
        let Some(parent) = image.parent() else { continue };
        let Some(element) = parent.value().as_element() else { continue };
        if element.name() == "a"
            && let Some(href) = element.attr("href")
            && is_media_host(href, media_hosts)
            && !anchors.contains(&parent.id())
        {
            anchors.push(parent.id());
        }
    }
    for anchor_id in anchors {
        let child_ids: Vec<_> = match fragment.tree.get(anchor_id) {
            Some(anchor) => anchor.children().map(|child| child.id()).collect(),
            None => continue,
        };
        for child_id in child_ids {
            if let Some(mut anchor) = fragment.tree.get_mut(anchor_id) {
                anchor.insert_id_before(child_id);
            }
        }
        if let Some(mut anchor) = fragment.tree.get_mut(anchor_id) {
            anchor.detach();
        }
    }
}

fn is_media_host(href: &str, media_hosts: &[String]) -> bool {
    let Some(host) = host_of(href) else { return false };
    media_hosts.iter().any(|candidate| {
        let candidate = candidate.as_str();
        host == candidate || host.ends_with(&format!(".{candidate}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<String> {
        consts::DEFAULT_MEDIA_HOSTS.iter().map(|host| host.to_string()).collect()
    }

    fn normalize(html: &str) -> String {
        let mut fragment = Html::parse_fragment(html);
        normalize_images(&mut fragment, &hosts());
        dom::to_html(&fragment)
    }

    #[test]
    fn test_platform_classes_are_stripped() {
        let html = normalize(r#"<img class="alignnone size-full wp-image-9 fancy" src="a.jpg">"#);
        assert!(html.contains(r#"class="fancy""#));
        assert!(!html.contains("alignnone"));
        assert!(!html.contains("wp-image-9"));
    }

    #[test]
    fn test_empty_class_attribute_is_dropped() {
        let html = normalize(r#"<img class="aligncenter" src="a.jpg">"#);
        assert!(!html.contains("class="));
    }

    #[test]
    fn test_dimensions_and_title_are_removed() {
        let html = normalize(r#"<img src="a.jpg" width="640" height="480" title="old">"#);
        assert!(!html.contains("width="));
        assert!(!html.contains("height="));
        assert!(!html.contains("title="));
        assert!(html.contains("style="));
    }

    #[test]
    fn test_empty_alt_gets_a_placeholder() {
        let html = normalize(r#"<img src="a.jpg" alt="">"#);
        assert!(html.contains(r#"alt="Image from post""#));
        let html = normalize(r#"<img src="a.jpg" alt="kept">"#);
        assert!(html.contains(r#"alt="kept""#));
    }

    #[test]
    fn test_media_host_links_are_unwrapped() {
        let html = normalize(
            r#"<p><a href="https://myblog.files.wordpress.com/2015/03/a.jpg"><img src="a.jpg"></a></p>"#,
        );
        assert!(!html.contains("<a "));
        assert!(html.contains("<img"));
    }

    #[test]
    fn test_other_links_are_kept() {
        let html = normalize(r#"<p><a href="https://example.com/page"><img src="a.jpg"></a></p>"#);
        assert!(html.contains(r#"<a href="https://example.com/page">"#));
    }
}
