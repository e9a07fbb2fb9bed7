//! Front-matter rendering for converted posts.
//!
//! The document shape is a fixed [upon] template, extended with a `yaml`
//! formatter that escapes values destined for double-quoted YAML scalars.

use std::fmt::Write;

use exn::ResultExt;
use unpress_export::models::{DATE_TIME_FORMAT, Post};
use upon::{Engine, Template};

use crate::error::{ErrorKind, Result};

const FRONT_MATTER_TEMPLATE: &str = "---\n\
title: \"{{ title | yaml }}\"\n\
date: {{ date }}\n\
{% if has_categories %}categories: [{{ categories }}]\n\
{% endif %}{% if has_tags %}tags: [{{ tags }}]\n\
{% endif %}{% if has_description %}description: \"{{ description | yaml }}\"\n\
{% endif %}layout: post\n\
---";

/// Maximum description length; longer excerpts are cut at a character
/// boundary and ellipsised.
const MAX_DESCRIPTION_LEN: usize = 160;

/// Renders the front-matter block for converted posts.
///
/// Construction compiles the template eagerly so a template problem
/// surfaces at converter creation, not per post.
pub(crate) struct FrontMatter {
    engine: Engine<'static>,
    template: Template<'static>,
    utc_offset: String,
}

impl FrontMatter {
    pub(crate) fn new(utc_offset: impl Into<String>) -> Result<Self> {
        let mut engine = Engine::new();
        engine.add_formatter("yaml", yaml_formatter);
        let template = engine.compile(FRONT_MATTER_TEMPLATE.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template, utc_offset: utc_offset.into() })
    }

    pub(crate) fn render(&self, post: &Post) -> Result<String> {
        let date = post.date.format(&DATE_TIME_FORMAT).or_raise(|| ErrorKind::DateFormat)?;
        let description = summarize(&post.excerpt);
        self.template
            .render(&self.engine, upon::value! {
                title: post.title.as_str(),
                date: format!("{date} {}", self.utc_offset),
                has_categories: !post.categories.is_empty(),
                categories: quoted_list(&post.categories),
                has_tags: !post.tags.is_empty(),
                tags: quoted_list(&post.tags),
                has_description: !description.is_empty(),
                description: description,
            })
            .to_string()
            .or_raise(|| ErrorKind::FrontMatter)
    }
}

/// Formatter escaping a value for a double-quoted YAML scalar.
fn yaml_formatter(f: &mut upon::fmt::Formatter<'_>, value: &upon::Value) -> upon::fmt::Result {
    match value {
        upon::Value::String(s) => write!(f, "{}", yaml_escape(s))?,
        v => upon::fmt::default(f, v)?,
    };
    Ok(())
}

fn yaml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Renders labels as a quoted, comma-separated YAML flow sequence body.
fn quoted_list(labels: &[String]) -> String {
    labels.iter().map(|label| format!("\"{}\"", yaml_escape(label))).collect::<Vec<_>>().join(", ")
}

/// Collapses an excerpt into a single-line description, cut to
/// [`MAX_DESCRIPTION_LEN`] at a character boundary.
fn summarize(excerpt: &str) -> String {
    let collapsed = excerpt.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() <= MAX_DESCRIPTION_LEN {
        return collapsed;
    }
    let mut cut = MAX_DESCRIPTION_LEN - 3;
    while !collapsed.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &collapsed[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post() -> Post {
        Post {
            id: "7".to_string(),
            title: "Gallery \"Day\"".to_string(),
            date: datetime!(2015-03-02 08:15:00),
            slug: Some("gallery-day".to_string()),
            status: "publish".to_string(),
            content: String::new(),
            excerpt: "A short\ntrip.".to_string(),
            categories: vec!["Travel".to_string()],
            tags: vec!["sunsets".to_string(), "beaches".to_string()],
            link: None,
        }
    }

    #[test]
    fn test_full_front_matter_shape() {
        let front_matter = FrontMatter::new("+0100").unwrap();
        let rendered = front_matter.render(&post()).unwrap();
        let expected = "---\n\
            title: \"Gallery \\\"Day\\\"\"\n\
            date: 2015-03-02 08:15:00 +0100\n\
            categories: [\"Travel\"]\n\
            tags: [\"sunsets\", \"beaches\"]\n\
            description: \"A short trip.\"\n\
            layout: post\n\
            ---";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut post = post();
        post.categories.clear();
        post.tags.clear();
        post.excerpt.clear();
        let front_matter = FrontMatter::new("+0000").unwrap();
        let rendered = front_matter.render(&post).unwrap();
        assert!(!rendered.contains("categories:"));
        assert!(!rendered.contains("tags:"));
        assert!(!rendered.contains("description:"));
        assert!(rendered.ends_with("layout: post\n---"));
    }

    #[test]
    fn test_long_excerpts_are_truncated() {
        let mut post = post();
        post.excerpt = "word ".repeat(100);
        let front_matter = FrontMatter::new("+0000").unwrap();
        let rendered = front_matter.render(&post).unwrap();
        let description =
            rendered.lines().find(|line| line.starts_with("description:")).unwrap();
        assert!(description.ends_with("...\""));
        assert!(description.len() < 180);
    }
}
