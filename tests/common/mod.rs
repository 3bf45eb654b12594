//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use cite_copy::{CitationRecord, CitationStyle, PageMetadata};

/// The page every reference-output test cites.
pub const URL: &str = "https://example.com/a";
pub const TITLE: &str = "Example Page";
pub const AUTHOR: &str = "Jane Doe";

/// Saved HTML for the reference page, with an author and a site name.
pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Example Page</title>
  <meta name="author" content="Jane Doe">
  <meta property="og:site_name" content="Example Site">
</head>
<body><p>Hello</p></body>
</html>"#;

/// Saved HTML for a page with neither author nor site name.
pub const ANONYMOUS_PAGE_HTML: &str = r#"<html><head><title>Example Page</title></head></html>"#;

/// 2024-01-15, the access date used by the reference outputs.
pub fn access_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Metadata of the reference page with the given author.
pub fn page(author: &str) -> PageMetadata {
    PageMetadata::new(URL, TITLE).with_author(author)
}

/// Build `count` records numbered 1..=count, each with a distinct text.
pub fn build_records(count: usize) -> Vec<CitationRecord> {
    (1..=count)
        .map(|n| {
            CitationRecord::new(
                format!("\"quote {}\" [{}]", n, n),
                CitationStyle::Ieee,
                format!("https://example.com/{}", n),
                format!("Page {}", n),
                Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            )
        })
        .collect()
}
