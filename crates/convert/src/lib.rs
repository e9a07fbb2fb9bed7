//! Content rewriting for exported posts: gallery resolution, inline image
//! localization, markup cleanup and grouping, front matter, and post
//! writing.
//!
//! The pipeline is batch-sequential and synchronous: one [`Converter::run`]
//! walks the export's posts in document order, consulting (and lazily
//! extending) a per-run [`MediaIndex`](unpress_media::MediaIndex).

mod cleanup;
mod consts;
mod convert;
mod dom;
pub mod error;
mod frontmatter;
mod gallery;
mod group;
mod images;

pub use crate::consts::DEFAULT_MEDIA_HOSTS;
pub use crate::convert::{ConvertOptions, Converter, RunReport};

/// Counts embedded image references in raw post content: `<img>` tags plus
/// gallery shortcodes. Used for listing, not conversion.
pub fn count_image_refs(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    consts::IMG_TAG_REGEX.find_iter(content).count() + consts::GALLERY_SHORTCODE_REGEX.find_iter(content).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use time::macros::datetime;
    use unpress_export::models::{AttachmentRecord, Post};
    use unpress_export::{Channel, PostFilter};

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"jpeg").unwrap();
    }

    fn gallery_post() -> Post {
        Post {
            id: "7".to_string(),
            title: "Gallery Day".to_string(),
            date: datetime!(2015-03-02 08:15:00),
            slug: Some("gallery-day".to_string()),
            status: "publish".to_string(),
            content: r#"<p>Intro.</p>[gallery ids="3,4"]"#.to_string(),
            excerpt: String::new(),
            categories: vec!["Travel".to_string()],
            tags: vec![],
            link: None,
        }
    }

    fn scenario_channel() -> Channel {
        Channel {
            posts: vec![gallery_post()],
            attachments: vec![
                AttachmentRecord::new("3", Some("7".to_string()), "https://files.wordpress.com/2015/03/sunset.jpg"),
                AttachmentRecord::new("4", Some("7".to_string()), "https://files.wordpress.com/2015/03/moon.jpg"),
            ],
            malformed_items: 0,
        }
    }

    #[test]
    fn test_gallery_post_end_to_end() {
        let media = tempfile::tempdir().unwrap();
        touch(&media.path().join("2015/03/sunset.jpg"));
        touch(&media.path().join("2015/03/moon.jpg"));
        let out = tempfile::tempdir().unwrap();
        let posts_dir = out.path().join("_posts");
        let images_dir = out.path().join("images");

        let converter = Converter::new(ConvertOptions::new(media.path(), &posts_dir, &images_dir)).unwrap();
        let report = converter.run(&scenario_channel(), &PostFilter::new());
        assert_eq!(report.total, 1);
        assert_eq!(report.converted, 1);
        assert_eq!(report.failed, 0);

        let written = fs::read_to_string(posts_dir.join("2015-03-02-gallery-day.md")).unwrap();
        assert!(written.starts_with("---\ntitle: \"Gallery Day\"\n"));
        assert!(written.contains("<div class=\"gallery\">"));
        let sunset = written.find("/images/2015-03-02/sunset.jpg").unwrap();
        let moon = written.find("/images/2015-03-02/moon.jpg").unwrap();
        assert!(sunset < moon, "gallery must keep the declared ID order");
        assert!(images_dir.join("2015-03-02/sunset.jpg").is_file());
        assert!(images_dir.join("2015-03-02/moon.jpg").is_file());
    }

    #[test]
    fn test_gallery_post_with_a_missing_attachment() {
        let media = tempfile::tempdir().unwrap();
        touch(&media.path().join("2015/03/sunset.jpg"));
        // moon.jpg is absent from disk.
        let out = tempfile::tempdir().unwrap();
        let posts_dir = out.path().join("_posts");
        let images_dir = out.path().join("images");

        let converter = Converter::new(ConvertOptions::new(media.path(), &posts_dir, &images_dir)).unwrap();
        let report = converter.run(&scenario_channel(), &PostFilter::new());
        // The unresolved attachment is dropped, not fatal.
        assert_eq!(report.converted, 1);

        let written = fs::read_to_string(posts_dir.join("2015-03-02-gallery-day.md")).unwrap();
        assert!(written.contains("/images/2015-03-02/sunset.jpg"));
        assert!(!written.contains("moon.jpg"));
    }

    #[test]
    fn test_filtered_posts_never_touch_the_output() {
        let media = tempfile::tempdir().unwrap();
        touch(&media.path().join("2015/03/sunset.jpg"));
        touch(&media.path().join("2015/03/moon.jpg"));
        let out = tempfile::tempdir().unwrap();
        let posts_dir = out.path().join("_posts");
        let images_dir = out.path().join("images");

        let converter = Converter::new(ConvertOptions::new(media.path(), &posts_dir, &images_dir)).unwrap();
        let filter = PostFilter::new().with_ids(["999"]);
        let report = converter.run(&scenario_channel(), &filter);
        assert_eq!(report.total, 1);
        assert_eq!(report.converted, 0);
        assert_eq!(report.filtered, 1);
        assert!(!posts_dir.exists());
        assert!(!images_dir.exists());
    }

    #[test]
    fn test_unpublished_posts_are_ignored() {
        let media = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let mut channel = scenario_channel();
        channel.posts[0].status = "draft".to_string();

        let converter = Converter::new(ConvertOptions::new(
            media.path(),
            out.path().join("_posts"),
            out.path().join("images"),
        ))
        .unwrap();
        let report = converter.run(&channel, &PostFilter::new());
        assert_eq!(report, RunReport::default());
    }

    #[test]
    fn test_count_image_refs() {
        assert_eq!(count_image_refs(""), 0);
        assert_eq!(count_image_refs(r#"<p><img src="a.jpg"><img src="b.jpg"></p>[gallery]"#), 3);
    }
}
