//! Clipboard output.
//!
//! Citations are written to the clipboard as plain text.

use thiserror::Error;

/// Errors that can occur when writing to the clipboard.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write to clipboard: {0}")]
    WriteFailed(String),
}

/// Somewhere plain text can be copied to.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Connects to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error when no clipboard is reachable (e.g. a headless session).
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

/// Clipboard that keeps everything written to it, newest last.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written text.
    pub fn last(&self) -> Option<&str> {
        self.contents.last().map(String::as_str)
    }

    pub fn writes(&self) -> usize {
        self.contents.len()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_keeps_last_write() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.last(), None);

        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();

        assert_eq!(clipboard.last(), Some("second"));
        assert_eq!(clipboard.writes(), 2);
    }
}
