//! Text shown to the user.
//!
//! Copy notifications, history listings and the plain-text history export.

use chrono::{DateTime, TimeZone, Utc};

use crate::history::CitationRecord;
use crate::style::CitationStyle;

/// Message announcing a successful copy.
pub fn notification_message(style: CitationStyle, number: u32) -> String {
    format!(
        "引用形式でコピーしました（{}、引用番号: {}）",
        style.display_name(),
        number
    )
}

/// Formats a timestamp in `tz` the way history views show it, e.g.
/// `2024/1/15 9:05:00`.
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%Y/%-m/%-d %-H:%M:%S")
        .to_string()
}

/// Generates the plain-text export of every record, numbered from 1.
///
/// # Arguments
///
/// * `records` - History records, newest first
/// * `tz` - Time zone timestamps are shown in
///
/// # Returns
///
/// The export text, or an empty string when there are no records.
pub fn export_history<Tz: TimeZone>(records: &[CitationRecord], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            format!(
                "=== 引用 {} ===\n{}\nページ: {}\nURL: {}\n日時: {}\n\n",
                i + 1,
                record.text,
                record.title,
                record.url,
                format_timestamp(&record.timestamp, tz)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generates a human-readable listing of the history, one block per record.
pub fn history_listing<Tz: TimeZone>(records: &[CitationRecord], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut output = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "[{}] {}\n    形式: {} | 日時: {}\n",
            i + 1,
            record.title,
            record.style.label(),
            format_timestamp(&record.timestamp, tz)
        ));
        for line in record.text.lines() {
            output.push_str("    ");
            output.push_str(line);
            output.push('\n');
        }
    }
    output
}
