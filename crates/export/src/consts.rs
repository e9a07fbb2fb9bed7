use regex::Regex;
use std::sync::LazyLock;

/// XML namespace of WordPress-specific export elements (`wp:post_id`, …).
pub const WP_NS: &str = "http://wordpress.org/export/1.2/";
/// XML namespace of the RSS content module (`content:encoded`).
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
/// XML namespace of the WordPress excerpt module (`excerpt:encoded`).
pub const EXCERPT_NS: &str = "http://wordpress.org/export/1.2/excerpt/";

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Upload URLs embed the upload date as a /YYYY/MM/ path segment.
regex!(URL_DATE_REGEX, r"/(\d{4})/(\d{2})/");
regex!(URL_HOST_REGEX, r"^[a-zA-Z][a-zA-Z0-9+.-]*://([^/]+)");
