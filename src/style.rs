//! Citation styles.
//!
//! The five supported styles, their external identifiers and display names.
//! Parsing is lenient: anything unrecognized resolves to [`CitationStyle::Japanese`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A bibliographic style a citation can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CitationStyle {
    /// Japanese footnote style (the default).
    #[default]
    Japanese,
    Apa,
    Mla,
    Chicago,
    Ieee,
}

/// Single source of truth for styles: (style, identifier, display name, short label).
const STYLES: &[(CitationStyle, &str, &str, &str)] = &[
    (CitationStyle::Japanese, "japanese", "日本語形式", "日本語"),
    (CitationStyle::Apa, "apa", "APA形式", "APA"),
    (CitationStyle::Mla, "mla", "MLA形式", "MLA"),
    (CitationStyle::Chicago, "chicago", "Chicago形式", "Chicago"),
    (CitationStyle::Ieee, "ieee", "IEEE形式", "IEEE"),
];

impl CitationStyle {
    /// Looks up a style by its exact identifier.
    ///
    /// Returns `None` for unknown identifiers; see [`CitationStyle::from_id`]
    /// for the lenient variant used at the edges.
    pub fn lookup(id: &str) -> Option<CitationStyle> {
        STYLES
            .iter()
            .find(|(_, name, _, _)| *name == id)
            .map(|(style, _, _, _)| *style)
    }

    /// Resolves a style identifier, falling back to `Japanese` when the
    /// identifier is missing or unknown. Matching is exact.
    pub fn from_id(id: Option<&str>) -> CitationStyle {
        match id {
            Some(name) => CitationStyle::lookup(name).unwrap_or_else(|| {
                tracing::debug!(style = name, "unknown citation style, using japanese");
                CitationStyle::Japanese
            }),
            None => CitationStyle::Japanese,
        }
    }

    /// The external identifier (`japanese`, `apa`, ...).
    pub fn id(self) -> &'static str {
        self.entry().1
    }

    /// The display name used in notifications (e.g. `APA形式`).
    pub fn display_name(self) -> &'static str {
        self.entry().2
    }

    /// The short label used in history listings (e.g. `APA`).
    pub fn label(self) -> &'static str {
        self.entry().3
    }

    fn entry(self) -> &'static (CitationStyle, &'static str, &'static str, &'static str) {
        // Every variant has exactly one row in STYLES.
        match self {
            CitationStyle::Japanese => &STYLES[0],
            CitationStyle::Apa => &STYLES[1],
            CitationStyle::Mla => &STYLES[2],
            CitationStyle::Chicago => &STYLES[3],
            CitationStyle::Ieee => &STYLES[4],
        }
    }
}

/// Returns every supported style, in listing order.
pub fn all_styles() -> Vec<CitationStyle> {
    STYLES.iter().map(|(style, _, _, _)| *style).collect()
}

/// Returns the list of accepted style identifiers.
pub fn style_names() -> Vec<&'static str> {
    STYLES.iter().map(|(_, name, _, _)| *name).collect()
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for CitationStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for CitationStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(CitationStyle::from_id(raw.as_deref()))
    }
}
