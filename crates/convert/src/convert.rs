//! The per-post conversion pipeline and the batch driver.

use std::fs;
use std::path::PathBuf;

use exn::ResultExt;
use scraper::Html;
use tracing::instrument;
use unpress_export::models::{DATE_FORMAT, Post, PostAttachments};
use unpress_export::{Channel, PostFilter};
use unpress_media::{Localizer, MediaIndex};

use crate::error::{ErrorKind, Result};
use crate::frontmatter::FrontMatter;
use crate::{cleanup, consts, dom, gallery, group, images};

/// Everything a conversion run needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Root of the exported media tree.
    pub media_root: PathBuf,
    /// Directory converted posts are written to.
    pub output_dir: PathBuf,
    /// Root of the site images tree (`/images/...` URLs map here).
    pub images_root: PathBuf,
    /// Hosts whose full-size-image link wrappers get unwrapped.
    pub media_hosts: Vec<String>,
    /// Convert the rewritten HTML to Markdown as a final step.
    pub markdown: bool,
    /// UTC offset string appended to front-matter dates.
    pub utc_offset: String,
}

impl ConvertOptions {
    pub fn new(media_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, images_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
            output_dir: output_dir.into(),
            images_root: images_root.into(),
            media_hosts: consts::DEFAULT_MEDIA_HOSTS.iter().map(|host| host.to_string()).collect(),
            markdown: false,
            utc_offset: "+0000".to_string(),
        }
    }
}

/// Counts from one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Published posts in the export.
    pub total: usize,
    /// Posts converted and written.
    pub converted: usize,
    /// Posts excluded by the ID/date filter.
    pub filtered: usize,
    /// Posts that failed conversion (skipped; the batch continued).
    pub failed: usize,
}

/// Drives the rewrite pipeline over an export, one post at a time in
/// document order.
pub struct Converter {
    options: ConvertOptions,
    front_matter: FrontMatter,
}

impl Converter {
    /// Fail-fast construction: the front-matter template is compiled once,
    /// here, rather than per post.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        let front_matter = FrontMatter::new(options.utc_offset.clone())?;
        Ok(Self { options, front_matter })
    }

    /// Converts every published post that passes `filter`.
    ///
    /// Builds a fresh [`MediaIndex`] for this run; the index is extended
    /// with discovered mappings as posts are rewritten and discarded when
    /// the run ends. A per-post failure is counted and logged, never fatal.
    /// Posts excluded by the filter are never rewritten and never touch the
    /// index.
    #[instrument(skip_all)]
    pub fn run(&self, channel: &Channel, filter: &PostFilter) -> RunReport {
        let mut index = MediaIndex::build(&self.options.media_root, &channel.attachments);
        let attachments = PostAttachments::from_records(&channel.attachments);
        let localizer = Localizer::new(&self.options.images_root);

        let mut report = RunReport::default();
        for post in &channel.posts {
            if !post.is_published() {
                continue;
            }
            report.total += 1;
            if !filter.matches(post) {
                report.filtered += 1;
                continue;
            }
            match self.convert_post(post, &attachments, &mut index, &localizer) {
                Ok(path) => {
                    tracing::info!(post = %post.id, path = %path.display(), "Converted post");
                    report.converted += 1;
                },
                Err(e) => {
                    tracing::warn!(post = %post.id, error = ?e, "Failed to convert post; continuing");
                    report.failed += 1;
                },
            }
        }
        report
    }

    /// Runs the full rewrite pipeline on one post and writes the result as
    /// `<output_dir>/<YYYY-MM-DD>-<slug>.md`.
    #[instrument(skip_all, fields(post = %post.id))]
    pub fn convert_post(
        &self,
        post: &Post,
        attachments: &PostAttachments,
        index: &mut MediaIndex,
        localizer: &Localizer,
    ) -> Result<PathBuf> {
        let body = self.rewrite_content(post, attachments, index, localizer);
        let front_matter = self.front_matter.render(post)?;

        let day = post.date.date().format(&DATE_FORMAT).or_raise(|| ErrorKind::DateFormat)?;
        fs::create_dir_all(&self.options.output_dir)
            .or_raise(|| ErrorKind::CreateDir(self.options.output_dir.clone()))?;
        let path = self.options.output_dir.join(format!("{day}-{}.md", slug_for(post)));
        fs::write(&path, format!("{front_matter}\n\n{body}")).or_raise(|| ErrorKind::Write(path.clone()))?;
        Ok(path)
    }

    /// The content rewrite: galleries, inline images, markup cleanup,
    /// grouping, and (optionally) Markdown conversion.
    ///
    /// Precondition: `post.content` has not previously passed through this
    /// pipeline. Rewriting is not idempotent on its own output.
    fn rewrite_content(
        &self,
        post: &Post,
        attachments: &PostAttachments,
        index: &mut MediaIndex,
        localizer: &Localizer,
    ) -> String {
        if post.content.trim().is_empty() {
            return String::new();
        }
        let content = gallery::rewrite_galleries(post, attachments, index, localizer);
        let mut fragment = Html::parse_fragment(&content);
        images::localize_images(&mut fragment, post.date.date(), index, localizer);
        cleanup::normalize_images(&mut fragment, &self.options.media_hosts);
        group::group_consecutive_images(&mut fragment);
        let html = dom::to_html(&fragment);
        if self.options.markdown {
            return to_markdown(html);
        }
        html
    }
}

#[cfg(feature = "markdown")]
fn to_markdown(html: String) -> String {
    html2md::rewrite_html(&html, true)
}

#[cfg(not(feature = "markdown"))]
fn to_markdown(html: String) -> String {
    tracing::warn!("Markdown output requested but this build lacks the `markdown` feature; keeping HTML");
    html
}

/// Slug for the output filename: the export's own slug when present,
/// otherwise the slugified title (quotation marks stripped first to avoid
/// awkward leading/trailing hyphens).
fn slug_for(post: &Post) -> String {
    if let Some(slug) = &post.slug
        && !slug.is_empty()
    {
        return slug.clone();
    }
    // Various quotation marks: '"''""„"`«»
    let marks = [
        '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}',
        '\u{0060}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
    ];
    let stripped: String = post.title.chars().filter(|c| !marks.contains(c)).collect();
    let slug = rslug::slugify!(&stripped);
    if slug.is_empty() { "untitled".to_string() } else { slug }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post_with_title(title: &str, slug: Option<&str>) -> Post {
        Post {
            id: "7".to_string(),
            title: title.to_string(),
            date: datetime!(2015-03-02 08:15:00),
            slug: slug.map(String::from),
            status: "publish".to_string(),
            content: String::new(),
            excerpt: String::new(),
            categories: vec![],
            tags: vec![],
            link: None,
        }
    }

    #[test]
    fn test_slug_prefers_the_exported_name() {
        assert_eq!(slug_for(&post_with_title("A Day Out", Some("a-day-out-2"))), "a-day-out-2");
    }

    #[test]
    fn test_slug_falls_back_to_the_title() {
        assert_eq!(slug_for(&post_with_title("\"Hello\" World's Day", None)), "hello-worlds-day");
    }

    #[test]
    fn test_unsluggable_titles_get_a_placeholder() {
        assert_eq!(slug_for(&post_with_title("«»", None)), "untitled");
    }
}
