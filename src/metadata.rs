//! Page metadata.
//!
//! Extracts the title, author and site name a citation needs from the HTML
//! of the cited page.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Errors that can occur when loading page metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Everything the formatter needs to know about the cited page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    /// Address of the page
    pub url: String,
    /// Document title
    pub title: String,
    /// Author, from `<meta name="author">` or `<meta property="article:author">`
    pub author: Option<String>,
    /// Site name, from `<meta property="og:site_name">`
    pub site_name: Option<String>,
}

impl PageMetadata {
    /// Creates metadata for a page with no author or site name.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        PageMetadata {
            url: url.into(),
            title: title.into(),
            author: None,
            site_name: None,
        }
    }

    /// Sets the author. Empty or whitespace-only values count as absent.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = non_empty(author.into());
        self
    }

    /// Sets the site name. Empty or whitespace-only values count as absent.
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = non_empty(site_name.into());
        self
    }

    /// The author, if one is present and not blank.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }

    /// The site name, if one is present and not blank.
    pub fn site_name(&self) -> Option<&str> {
        self.site_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex"));

static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b([^>]*)>").expect("meta regex"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("attribute regex")
});

/// Extracts page metadata from an HTML document.
///
/// # Arguments
///
/// * `html` - The page source
/// * `url` - The address the page was loaded from
///
/// # Examples
///
/// ```
/// use cite_copy::extract_metadata;
///
/// let html = r#"<html><head><title>Example Page</title>
/// <meta name="author" content="Jane Doe"></head></html>"#;
/// let meta = extract_metadata(html, "https://example.com/a");
/// assert_eq!(meta.title, "Example Page");
/// assert_eq!(meta.author(), Some("Jane Doe"));
/// assert_eq!(meta.site_name(), None);
/// ```
pub fn extract_metadata(html: &str, url: &str) -> PageMetadata {
    let title = TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| collapse_whitespace(&decode_entities(m.as_str())))
        .unwrap_or_default();

    let tags: Vec<MetaTag> = META_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| parse_meta_tag(m.as_str())))
        .collect();

    // name="author" wins over property="article:author"
    let author = find_content(&tags, "name", "author")
        .or_else(|| find_content(&tags, "property", "article:author"));
    let site_name = find_content(&tags, "property", "og:site_name");

    let mut meta = PageMetadata::new(url, title);
    if let Some(author) = author {
        meta = meta.with_author(author);
    }
    if let Some(site_name) = site_name {
        meta = meta.with_site_name(site_name);
    }
    meta
}

/// Reads an HTML file and extracts its metadata.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_metadata(path: &Path, url: &str) -> Result<PageMetadata, MetadataError> {
    let html = fs::read_to_string(path)?;
    Ok(extract_metadata(&html, url))
}

/// The attributes of one `<meta>` tag, lowercased names.
#[derive(Debug, Default)]
struct MetaTag {
    attrs: Vec<(String, String)>,
}

impl MetaTag {
    fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_meta_tag(inner: &str) -> MetaTag {
    let attrs = ATTR_RE
        .captures_iter(inner)
        .filter_map(|cap| {
            let key = cap.get(1)?.as_str().to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))?
                .as_str();
            Some((key, decode_entities(value)))
        })
        .collect();
    MetaTag { attrs }
}

/// First `content` of a tag whose `key` attribute equals `value` (case-insensitive).
fn find_content(tags: &[MetaTag], key: &str, value: &str) -> Option<String> {
    tags.iter()
        .find(|tag| {
            tag.get(key)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
        .and_then(|tag| tag.get("content"))
        .map(str::to_string)
}

/// Decodes named and numeric character references, as a browser would.
fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
