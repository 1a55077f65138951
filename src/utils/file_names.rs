//! File name helpers for entry HTML and downloaded images

use url::Url;

/// File name for an entry's HTML: the title with path separators replaced.
///
/// An empty title falls back to the slug, then to `untitled`.
pub fn entry_file_name(title: &str, slug: &str) -> String {
    let stem = if !title.is_empty() {
        title
    } else if !slug.is_empty() {
        slug
    } else {
        "untitled"
    };
    format!("{}.html", stem.replace('/', ":"))
}

/// Local file name for a downloaded image: the last non-empty path segment
/// of the URL, or `image` when there is none.
pub fn image_file_name(image_url: &str) -> String {
    let name = match Url::parse(image_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .filter(|segment| !segment.is_empty())
            .unwrap_or_else(|| "image".to_string()),
        Err(_) => image_url
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("image")
            .to_string(),
    };

    // Query strings and separators must not leak into the file name
    name.split(['?', '#'])
        .next()
        .unwrap_or("image")
        .replace(['\\', '/'], "_")
}
