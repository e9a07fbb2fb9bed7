use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Format of `wp:post_date` values (`2015-03-02 18:30:00`).
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Calendar-date-only format (`2015-03-02`), shared by date filters and the
/// date-partitioned output path scheme.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A post record from the export document.
///
/// Only `id` and `date` are required by the pipeline; everything else
/// degrades to an empty value when the export omits it. `content` is the raw
/// embedded HTML exactly as exported, before any rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// WordPress post ID. Kept as a string: IDs are only ever compared and
    /// matched against attachment parent references, never computed with.
    pub id: String,
    /// Post title ("Untitled Post" when the export has none).
    pub title: String,
    /// Publish date in site-local time.
    pub date: PrimitiveDateTime,
    /// URL slug (`wp:post_name`), when the export carries one.
    pub slug: Option<String>,
    /// Post status (`publish`, `draft`, …).
    pub status: String,
    /// Raw embedded post content (HTML plus shortcodes/block comments).
    pub content: String,
    /// Raw excerpt text.
    pub excerpt: String,
    /// Category labels, in document order.
    pub categories: Vec<String>,
    /// Tag labels, in document order.
    pub tags: Vec<String>,
    /// Original permalink.
    pub link: Option<String>,
}

impl Post {
    /// Returns `true` for posts that were published on the source platform.
    pub fn is_published(&self) -> bool {
        self.status == "publish"
    }
}
