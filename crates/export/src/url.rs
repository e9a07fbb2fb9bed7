//! Helpers for picking apart media URLs without a full URL parser.
//!
//! Export documents reference media by absolute URL; all the pipeline ever
//! needs from those URLs is the bare filename, the host, and the embedded
//! `/YYYY/MM/` upload-date segment.

use crate::consts;

/// Returns the percent-decoded final path segment of a URL, with any query
/// string or fragment stripped. `None` when the URL has no usable basename
/// (e.g. it ends in a slash).
pub fn filename_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    // Drop the scheme and host so a path-less URL yields no filename.
    let path = path.split_once("://").map(|(_, rest)| rest).unwrap_or(path);
    let (_, name) = path.rsplit_once('/')?;
    if name.is_empty() {
        return None;
    }
    // A bad percent-escape is kept verbatim rather than dropped; the
    // filename is only ever used for lookups against the media tree.
    let decoded = urlencoding::decode(name).map(|c| c.into_owned()).unwrap_or_else(|_| name.to_string());
    Some(decoded)
}

/// Returns the host portion of an absolute URL, or `None` for relative URLs.
pub fn host_of(url: &str) -> Option<&str> {
    consts::URL_HOST_REGEX.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Returns the `(year, month)` strings of the first `/YYYY/MM/` segment in
/// the URL path, zero-padding preserved.
pub fn upload_date_of(url: &str) -> Option<(String, String)> {
    let captures = consts::URL_DATE_REGEX.captures(url)?;
    Some((captures.get(1)?.as_str().to_string(), captures.get(2)?.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://files.wordpress.com/2015/03/sunset.jpg", Some("sunset.jpg"))]
    #[case("https://example.com/a/b/photo.png?w=300", Some("photo.png"))]
    #[case("https://example.com/a/space%20name.jpg", Some("space name.jpg"))]
    #[case("https://example.com/dir/", None)]
    #[case("https://example.com", None)]
    fn test_filename_from_url(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(filename_from_url(url).as_deref(), expected);
    }

    #[rstest]
    #[case("https://files.wordpress.com/2015/03/sunset.jpg", Some("files.wordpress.com"))]
    #[case("http://example.com/x", Some("example.com"))]
    #[case("/images/2015-03-02/sunset.jpg", None)]
    fn test_host_of(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(host_of(url), expected);
    }

    #[test]
    fn test_upload_date_of() {
        let (year, month) = upload_date_of("https://files.wordpress.com/2015/03/sunset.jpg").unwrap();
        assert_eq!(year, "2015");
        assert_eq!(month, "03");
        assert_eq!(upload_date_of("https://example.com/sunset.jpg"), None);
    }
}
