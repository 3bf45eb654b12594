//! Citation sessions.
//!
//! A [`Session`] carries the footnote counter of one delivery context. Each
//! citation request is handled to completion: the counter advances, the
//! citation is formatted, then [`deliver`] copies it and records it. Only
//! formatting can be relied on; copying and saving are side-effects whose
//! failure is logged and reported in the returned [`Delivery`].

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardSink;
use crate::formatter::{format_citation, CitationContext};
use crate::history::{CitationRecord, HistoryStore};
use crate::metadata::PageMetadata;
use crate::output::notification_message;
use crate::settings::Settings;
use crate::store::{KeyValueStore, StoreError};
use crate::style::CitationStyle;

/// Key the session counter is stored under.
pub const SESSION_KEY: &str = "session";

/// Counter state for one delivery context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    counter: u32,
}

/// What the user asked to cite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CiteRequest {
    /// The selected text, untrimmed
    pub text: String,
    /// Style override; the settings' style is used when `None`
    pub style: Option<CitationStyle>,
    /// Footnote number override; the session continues from it
    pub number: Option<u32>,
}

impl CiteRequest {
    pub fn new(text: impl Into<String>) -> Self {
        CiteRequest {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: CitationStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

/// A formatted citation and everything needed to deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiteOutcome {
    pub citation: String,
    pub style: CitationStyle,
    pub number: u32,
    /// History entry for this citation
    pub record: CitationRecord,
    /// Message to show the user, when notifications are on
    pub notification: Option<String>,
}

/// Which side-effects of a delivery went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    pub copied: bool,
    pub saved: bool,
}

impl Delivery {
    /// The message to show for `outcome`. Only a citation that reached the
    /// clipboard is announced, and only when notifications are on.
    pub fn notification<'a>(&self, outcome: &'a CiteOutcome) -> Option<&'a str> {
        if self.copied {
            outcome.notification.as_deref()
        } else {
            None
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counter(counter: u32) -> Self {
        Session { counter }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the footnote number for the next citation, advancing the
    /// counter first when `auto_increment` is on.
    pub fn next_number(&mut self, settings: &Settings) -> u32 {
        if settings.auto_increment {
            self.counter = self.counter.saturating_add(1);
        }
        self.counter
    }

    /// Formats a citation for `request` taken from the page `meta`.
    ///
    /// `now` is the local time of the request; its date is the access date.
    pub fn cite(
        &mut self,
        request: &CiteRequest,
        meta: &PageMetadata,
        settings: &Settings,
        now: DateTime<Local>,
    ) -> CiteOutcome {
        let number = match request.number {
            Some(number) => {
                self.counter = number;
                number
            }
            None => self.next_number(settings),
        };
        let style = request.style.unwrap_or(settings.citation_style);

        let ctx = CitationContext::new(number, now.date_naive());
        let citation = format_citation(&request.text, meta, &ctx, style);
        tracing::debug!(style = %style, number, "formatted citation");

        let record = CitationRecord::new(
            citation.clone(),
            style,
            meta.url.clone(),
            meta.title.clone(),
            now.with_timezone(&Utc),
        );
        let notification = settings
            .show_notification
            .then(|| notification_message(style, number));

        CiteOutcome {
            citation,
            style,
            number,
            record,
            notification,
        }
    }
}

/// Copies `outcome` to `clipboard` and, when `save_history` is on, records it
/// in `history`.
///
/// Never fails: a clipboard or store error is logged and leaves the
/// corresponding flag of the returned [`Delivery`] unset.
pub fn deliver<S: KeyValueStore>(
    outcome: &CiteOutcome,
    settings: &Settings,
    history: &mut HistoryStore<S>,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> Delivery {
    let mut delivery = Delivery::default();

    match clipboard {
        Some(clipboard) => match clipboard.write_text(&outcome.citation) {
            Ok(()) => delivery.copied = true,
            Err(e) => tracing::warn!(error = %e, "could not copy citation to clipboard"),
        },
        None => tracing::debug!("no clipboard, skipping copy"),
    }

    if settings.save_history {
        match history.append(outcome.record.clone()) {
            Ok(()) => delivery.saved = true,
            Err(e) => tracing::warn!(error = %e, "could not save citation to history"),
        }
    }

    delivery
}

/// Reads the session stored in `store`, or a fresh one.
pub fn load_session<S: KeyValueStore>(store: &S) -> Result<Session, StoreError> {
    match store.get(SESSION_KEY)? {
        Some(value) => serde_json::from_value(value).map_err(|source| StoreError::JsonError {
            key: SESSION_KEY.to_string(),
            source,
        }),
        None => Ok(Session::new()),
    }
}

/// Writes `session` to `store`.
pub fn save_session<S: KeyValueStore>(store: &mut S, session: &Session) -> Result<(), StoreError> {
    let value = serde_json::to_value(session).map_err(|source| StoreError::JsonError {
        key: SESSION_KEY.to_string(),
        source,
    })?;
    store.set(SESSION_KEY, value)
}
