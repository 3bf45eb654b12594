//! cite-copy: copy quoted excerpts of web pages as formatted citations.
//!
//! This library provides functionality to:
//! - Extract the title, author and site name of a page from its HTML
//! - Format a quoted excerpt in the japanese, apa, mla, chicago or ieee style
//! - Keep a capped, newest-first citation history and the user's settings
//!   behind a key-value store
//! - Deliver citations to the clipboard and the history

pub mod clipboard;
pub mod formatter;
pub mod history;
pub mod metadata;
pub mod output;
pub mod session;
pub mod settings;
pub mod store;
pub mod style;

pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard};
pub use formatter::{format_citation, hostname_or_url, CitationContext, UNKNOWN_AUTHOR};
pub use history::{CitationRecord, History, HistoryStore, HISTORY_CAPACITY};
pub use metadata::{extract_metadata, load_metadata, PageMetadata};
pub use output::{export_history, history_listing, notification_message};
pub use session::{deliver, load_session, save_session, CiteOutcome, CiteRequest, Delivery, Session};
pub use settings::{Settings, SettingsStore};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use style::{style_names, CitationStyle};
