//! Grouping runs of consecutive images into a single wrapper container.

use scraper::Html;

use crate::consts;
use crate::dom;

/// Re-parents every run of two or more consecutive `<img>` siblings into one
/// wrapper `<div>` inserted at the first image's position, preserving order.
///
/// Whitespace-only text between images is layout noise and does not break a
/// run; any other sibling does. Singleton images stay where they are, and
/// containers this pipeline already produced are left untouched.
pub(crate) fn group_consecutive_images(fragment: &mut Html) {
    // Collect parents up front; re-parenting mid-traversal would invalidate
    // the walk.
    let parents: Vec<_> = fragment
        .root_element()
        .descendants()
        .filter(|node| node.value().as_element().is_some_and(|el| !is_pipeline_container(el)))
        .map(|node| node.id())
        .collect();

    for parent_id in parents {
        let Some(parent) = fragment.tree.get(parent_id) else { continue };

        let mut runs: Vec<Vec<_>> = Vec::new();
        let mut current: Vec<_> = Vec::new();
        for child in parent.children() {
            if dom::is_image(child.value()) {
                current.push(child.id());
            } else if dom::is_blank_text(child.value()) {
                // Transparent: inter-element whitespace never separates
                // images visually.
            } else {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
        if current.len() > 1 {
            runs.push(current);
        }

        for run in runs {
            let Some(wrapper_value) = dom::element_node(consts::IMAGE_ROW_HTML) else { continue };
            let Some(mut first) = fragment.tree.get_mut(run[0]) else { continue };
            let wrapper_id = first.insert_before(wrapper_value).id();
            for image_id in run {
                if let Some(mut wrapper) = fragment.tree.get_mut(wrapper_id) {
                    wrapper.append_id(image_id);
                }
            }
        }
    }
}

fn is_pipeline_container(element: &scraper::node::Element) -> bool {
    element.attr("class").is_some_and(|class| {
        class
            .split_whitespace()
            .any(|token| token == consts::GALLERY_CLASS || token == consts::IMAGE_ROW_CLASS)
    })
}
