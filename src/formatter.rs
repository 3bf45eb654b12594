//! Citation formatting.
//!
//! Turns a selected excerpt plus page metadata into a citation string in one
//! of the five supported styles. Formatting is a pure function of its inputs:
//! the footnote number and access date arrive through [`CitationContext`].

use chrono::{Datelike, NaiveDate};
use url::Url;

use crate::metadata::PageMetadata;
use crate::style::CitationStyle;

/// Placeholder used by the Western styles when a page names no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Per-call state the formatter needs besides the page itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationContext {
    /// Footnote / reference number
    pub number: u32,
    /// Local date on which the page was accessed
    pub accessed: NaiveDate,
}

impl CitationContext {
    pub fn new(number: u32, accessed: NaiveDate) -> Self {
        CitationContext { number, accessed }
    }

    /// Year of the access date.
    pub fn year(&self) -> i32 {
        self.accessed.year()
    }
}

/// Formats a citation for `text` taken from the page described by `meta`.
///
/// The text is trimmed before quoting. Missing metadata never fails: the
/// Japanese style switches to its web-article form and the other styles
/// substitute [`UNKNOWN_AUTHOR`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cite_copy::{format_citation, CitationContext, CitationStyle, PageMetadata};
///
/// let meta = PageMetadata::new("https://example.com/a", "Example Page").with_author("Jane Doe");
/// let ctx = CitationContext::new(1, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
///
/// let citation = format_citation("  Hello ", &meta, &ctx, CitationStyle::Chicago);
/// assert_eq!(
///     citation,
///     "\"Hello\"1\n\n1. Jane Doe, \"Example Page,\" accessed 2024-01-15, https://example.com/a."
/// );
/// ```
pub fn format_citation(
    text: &str,
    meta: &PageMetadata,
    ctx: &CitationContext,
    style: CitationStyle,
) -> String {
    let text = text.trim();
    match style {
        CitationStyle::Japanese => format_japanese(text, meta, ctx),
        CitationStyle::Apa => format_apa(text, meta, ctx),
        CitationStyle::Mla => format_mla(text, meta, ctx),
        CitationStyle::Chicago => format_chicago(text, meta, ctx),
        CitationStyle::Ieee => format_ieee(text, meta, ctx),
    }
}

fn format_japanese(text: &str, meta: &PageMetadata, ctx: &CitationContext) -> String {
    let num = ctx.number;
    let mut citation = format!("\"{}\"{})\n\n", text, num);

    if let Some(author) = meta.author() {
        citation.push_str(&format!("{}) {}著．{}．{}．\n", num, author, meta.title, ctx.year()));
    } else {
        citation.push_str(&format!("{}) \"{}\"．", num, meta.title));
        if let Some(site_name) = meta.site_name() {
            citation.push_str(&format!("{}．", site_name));
        }
        citation.push_str(&format!(
            "{}．{}，（参照 {}）．",
            ctx.year(),
            meta.url,
            format_access_date(ctx.accessed)
        ));
    }

    citation
}

fn format_apa(text: &str, meta: &PageMetadata, ctx: &CitationContext) -> String {
    let author = meta.author().unwrap_or(UNKNOWN_AUTHOR);
    format!(
        "\"{text}\" ({author}, {year})\n\n{author}. ({year}). {title}. Retrieved {date}, from {url}",
        year = ctx.year(),
        title = meta.title,
        date = format_long_date(ctx.accessed),
        url = meta.url,
    )
}

fn format_mla(text: &str, meta: &PageMetadata, ctx: &CitationContext) -> String {
    let author = meta.author().unwrap_or(UNKNOWN_AUTHOR);
    format!(
        "\"{text}\" ({author})\n\n{author}. \"{title}.\" {host}, {date}. Web. {url}",
        title = meta.title,
        host = hostname_or_url(&meta.url),
        date = format_access_date(ctx.accessed),
        url = meta.url,
    )
}

fn format_chicago(text: &str, meta: &PageMetadata, ctx: &CitationContext) -> String {
    let author = meta.author().unwrap_or(UNKNOWN_AUTHOR);
    format!(
        "\"{text}\"{num}\n\n{num}. {author}, \"{title},\" accessed {date}, {url}.",
        num = ctx.number,
        title = meta.title,
        date = format_access_date(ctx.accessed),
        url = meta.url,
    )
}

fn format_ieee(text: &str, meta: &PageMetadata, ctx: &CitationContext) -> String {
    let author = meta.author().unwrap_or(UNKNOWN_AUTHOR);
    format!(
        "\"{text}\" [{num}]\n\n[{num}] {author}, \"{title},\" {year}. [Online]. Available: {url}. [Accessed: {date}].",
        num = ctx.number,
        title = meta.title,
        year = ctx.year(),
        url = meta.url,
        date = format_access_date(ctx.accessed),
    )
}

/// Returns the host part of `url`, or `url` itself when it cannot be parsed
/// or has no host.
pub fn hostname_or_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => url.to_string(),
        },
        Err(e) => {
            tracing::debug!(url, error = %e, "cannot parse url, using it as hostname");
            url.to_string()
        }
    }
}

/// Formats an access date as `YYYY-MM-DD`.
pub fn format_access_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date the US English long way, e.g. `January 15, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
