//! Post selection applied before any conversion work begins.

use std::collections::HashSet;

use time::Date;

use crate::models::Post;

/// Optional post-ID allowlist and inclusive publish-date bounds.
///
/// A post that fails the filter is never converted and never touches the
/// media index, so targeted re-runs stay cheap.
#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    ids: Option<HashSet<String>>,
    after: Option<Date>,
    before: Option<Date>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the run to the given post IDs.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Keeps only posts published on or after `date`.
    pub fn published_after(mut self, date: Date) -> Self {
        self.after = Some(date);
        self
    }

    /// Keeps only posts published on or before `date`.
    pub fn published_before(mut self, date: Date) -> Self {
        self.before = Some(date);
        self
    }

    /// Both date bounds compare the post's calendar date and are inclusive.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(ids) = &self.ids
            && !ids.contains(&post.id)
        {
            return false;
        }
        let date = post.date.date();
        if let Some(after) = self.after
            && date < after
        {
            return false;
        }
        if let Some(before) = self.before
            && date > before
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    fn post(id: &str, date: time::PrimitiveDateTime) -> Post {
        Post {
            id: id.to_string(),
            title: String::new(),
            date,
            slug: None,
            status: "publish".to_string(),
            content: String::new(),
            excerpt: String::new(),
            categories: vec![],
            tags: vec![],
            link: None,
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        assert!(PostFilter::new().matches(&post("7", datetime!(2015-03-02 08:15:00))));
    }

    #[test]
    fn test_id_allowlist() {
        let filter = PostFilter::new().with_ids(["7", "9"]);
        assert!(filter.matches(&post("7", datetime!(2015-03-02 08:15:00))));
        assert!(!filter.matches(&post("8", datetime!(2015-03-02 08:15:00))));
    }

    #[rstest]
    #[case(datetime!(2015-03-01 23:59:59), false)]
    #[case(datetime!(2015-03-02 00:00:00), true)]
    #[case(datetime!(2015-04-30 12:00:00), true)]
    #[case(datetime!(2015-05-01 00:00:00), false)]
    fn test_date_bounds_are_inclusive(#[case] date: time::PrimitiveDateTime, #[case] expected: bool) {
        let filter = PostFilter::new()
            .published_after(time::macros::date!(2015 - 03 - 02))
            .published_before(time::macros::date!(2015 - 04 - 30));
        assert_eq!(filter.matches(&post("7", date)), expected);
    }
}
