use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

selector!(IMG_SELECTOR, "img");

// The tiled/block gallery encoding: a structured comment whose JSON payload
// carries an "ids" array. Matched with its full span so replacement is
// positional.
regex!(TILED_GALLERY_REGEX, r#"<!-- wp:jetpack/tiled-gallery \{.*?"ids":\[([^\]]+)\].*? /-->"#);
// The legacy shortcode encoding; its attribute blob is parsed separately.
regex!(GALLERY_SHORTCODE_REGEX, r"\[gallery([^\]]*)\]");
regex!(GALLERY_IDS_REGEX, r#"ids="([^"]+)""#);
// Generated image markup names the attachment ID in a class token right
// before the src attribute.
regex!(WP_IMAGE_MARKER_REGEX, r#"wp-image-(\d+)"[^>]*src="([^"]+)""#);
regex!(IMG_TAG_REGEX, r#"<img[^>]+src="[^"]+"[^>]*>"#);

/// Class tokens (or token prefixes) carried over from the source platform's
/// image markup. Matched by substring, as the platform emits composites.
pub(crate) const PLATFORM_IMAGE_CLASSES: &[&str] =
    &["alignnone", "alignleft", "alignright", "aligncenter", "size-medium", "size-large", "size-full", "wp-image-"];

/// One fixed presentation style applied to every image. A deliberate
/// simplification; `!important` overrides whatever the target theme ships.
pub(crate) const IMG_STYLE: &str = "width: 200px !important; margin: 10px !important; \
     display: inline-block !important; vertical-align: top !important; float: none !important;";

pub(crate) const DEFAULT_ALT: &str = "Image from post";

pub(crate) const GALLERY_CLASS: &str = "gallery";
pub(crate) const IMAGE_ROW_CLASS: &str = "image-row";
pub(crate) const IMAGE_ROW_HTML: &str =
    r#"<div class="image-row" style="text-align: left; margin: 20px 0;"></div>"#;

/// Hosts whose full-size-image links are unwrapped by default.
pub const DEFAULT_MEDIA_HOSTS: &[&str] = &["files.wordpress.com"];
