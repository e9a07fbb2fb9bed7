//! Small helpers over the parsed HTML fragment tree.
//!
//! `scraper` exposes its backing tree as a public field, which is all the
//! mutation support the rewrite passes need: collect node IDs with an
//! immutable traversal first, then edit values and re-parent through the
//! tree handle.

use html5ever::{LocalName, QualName, namespace_url, ns};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use tendril::StrTendril;

/// Serializes a parsed fragment back to HTML, without the synthetic wrapper
/// element the fragment parser adds around the content.
pub(crate) fn to_html(fragment: &Html) -> String {
    fragment.root_element().inner_html()
}

/// Builds a detached element node from a snippet (its first element),
/// ready for insertion into another tree.
pub(crate) fn element_node(html: &str) -> Option<Node> {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().children().find_map(ElementRef::wrap).map(|el| Node::Element(el.value().clone()))
}

pub(crate) fn is_image(node: &Node) -> bool {
    node.as_element().is_some_and(|el| el.name() == "img")
}

/// True for text nodes containing only inter-element whitespace.
pub(crate) fn is_blank_text(node: &Node) -> bool {
    node.as_text().is_some_and(|text| text.trim().is_empty())
}

pub(crate) fn set_attr(element: &mut Element, name: &str, value: &str) {
    element.attrs.insert(attr_name(name), StrTendril::from(value));
}

pub(crate) fn remove_attr(element: &mut Element, name: &str) {
    let name = attr_name(name);
    element.attrs.retain(|key, _| *key != name);
}

fn attr_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name))
}
