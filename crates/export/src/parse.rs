//! WXR document parsing.
//!
//! A WordPress export is an RSS document whose `item` elements carry
//! WordPress-specific children under the `wp:` namespace. Parsing is a single
//! pass that splits items into posts and attachment records by
//! `wp:post_type`; everything else in the document is ignored.

use time::PrimitiveDateTime;
use tracing::instrument;

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{AttachmentRecord, DATE_TIME_FORMAT, Post};
use exn::{OptionExt, ResultExt};

type XmlNode<'a, 'input> = roxmltree::Node<'a, 'input>;

/// The parsed export document: every post and attachment record it carries,
/// in document order.
#[derive(Debug, Default)]
pub struct Channel {
    pub posts: Vec<Post>,
    pub attachments: Vec<AttachmentRecord>,
    /// Items of a known type that failed extraction (e.g. an unparseable
    /// `wp:post_date`). They are skipped with a diagnostic, never fatal.
    pub malformed_items: usize,
}

impl Channel {
    /// Parses a WXR export document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDocument`] when the XML itself does not
    /// parse and [`ErrorKind::MissingChannel`] when it parses but is not an
    /// RSS/WXR document. Both are fatal to the whole run; item-level
    /// failures are counted in [`malformed_items`](Self::malformed_items)
    /// instead.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn parse(xml: &str) -> Result<Self> {
        let document = match roxmltree::Document::parse(xml) {
            Ok(document) => document,
            Err(e) => exn::bail!(ErrorKind::MalformedDocument(e.to_string())),
        };
        let channel = document
            .root_element()
            .children()
            .find(|node| node.has_tag_name("channel"))
            .ok_or_raise(|| ErrorKind::MissingChannel)?;

        let mut parsed = Self::default();
        for item in channel.children().filter(|node| node.has_tag_name("item")) {
            match child_text(item, (consts::WP_NS, "post_type")).as_deref() {
                Some("post") => match parse_post(item) {
                    Ok(post) => parsed.posts.push(post),
                    Err(e) => {
                        tracing::warn!(error = ?e, "Skipping malformed post item");
                        parsed.malformed_items += 1;
                    },
                },
                Some("attachment") => match parse_attachment(item) {
                    Ok(record) => parsed.attachments.push(record),
                    Err(e) => {
                        tracing::warn!(error = ?e, "Skipping malformed attachment item");
                        parsed.malformed_items += 1;
                    },
                },
                // Pages, nav menu items, etc.
                _ => {},
            }
        }
        Ok(parsed)
    }
}

fn parse_post(item: XmlNode<'_, '_>) -> Result<Post> {
    let id = child_text(item, (consts::WP_NS, "post_id")).ok_or_raise(|| ErrorKind::MissingField("post_id"))?;
    let raw_date = child_text(item, (consts::WP_NS, "post_date")).ok_or_raise(|| ErrorKind::MissingField("post_date"))?;
    let date = PrimitiveDateTime::parse(&raw_date, &DATE_TIME_FORMAT).or_raise(|| ErrorKind::ParseError {
        field: "post_date",
        value: raw_date.clone(),
    })?;

    let mut categories = Vec::new();
    let mut tags = Vec::new();
    for category in item.children().filter(|node| node.has_tag_name("category")) {
        let label = text_content(category);
        if label.is_empty() {
            continue;
        }
        match category.attribute("domain") {
            Some("category") => categories.push(label),
            Some("post_tag") => tags.push(label),
            _ => {},
        }
    }

    Ok(Post {
        id,
        title: child_text(item, "title").unwrap_or_else(|| "Untitled Post".to_string()),
        date,
        slug: child_text(item, (consts::WP_NS, "post_name")),
        status: child_text(item, (consts::WP_NS, "status")).unwrap_or_default(),
        content: child_text(item, (consts::CONTENT_NS, "encoded")).unwrap_or_default(),
        excerpt: child_text(item, (consts::EXCERPT_NS, "encoded")).unwrap_or_default(),
        categories,
        tags,
        link: child_text(item, "link"),
    })
}

fn parse_attachment(item: XmlNode<'_, '_>) -> Result<AttachmentRecord> {
    let id = child_text(item, (consts::WP_NS, "post_id")).ok_or_raise(|| ErrorKind::MissingField("post_id"))?;
    let url = child_text(item, (consts::WP_NS, "attachment_url"))
        .ok_or_raise(|| ErrorKind::MissingField("attachment_url"))?;
    // Unattached media has a parent of "0".
    let parent = child_text(item, (consts::WP_NS, "post_parent")).filter(|parent| parent != "0");
    Ok(AttachmentRecord::new(id, parent, url))
}

fn child_text<'input, N>(item: XmlNode<'_, 'input>, name: N) -> Option<String>
where
    N: Into<roxmltree::ExpandedName<'static, 'static>>,
{
    let name = name.into();
    let text = item.children().find(|node| node.has_tag_name(name)).map(text_content)?;
    (!text.is_empty()).then_some(text)
}

/// Concatenates all direct text/CDATA children. `roxmltree::Node::text`
/// returns only the first text child, which loses content for elements
/// holding mixed CDATA and plain text.
fn text_content(node: XmlNode<'_, '_>) -> String {
    node.children().filter_map(|child| child.text()).collect()
}
