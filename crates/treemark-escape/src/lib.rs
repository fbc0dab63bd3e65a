//! HTML/XML entity escaping for treemark output.
//!
//! Thin wrapper around the `html-escape` crate that selects an entity set
//! per [`EscapeMode`]. The renderer calls [`escape`] for scalar text content
//! and attribute values; [`unescape`] is the reverse primitive exposed for
//! hook authors that need to recover the original text.

use std::borrow::Cow;

/// Entity set applied when escaping text content and attribute values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EscapeMode {
    /// Escape `&`, `<`, `>` and double quotes. Single quotes pass through.
    #[default]
    DoubleQuotes,
    /// Escape `&`, `<`, `>` and both quote characters.
    AllQuotes,
    /// Escape only the markup specials `&`, `<`, `>`.
    Specials,
    /// No escaping at all. The caller vouches for the text.
    Raw,
}

/// Escape `text` with the entity set selected by `mode`.
///
/// Returns a borrowed `Cow` when no character needed escaping.
#[must_use]
pub fn escape(text: &str, mode: EscapeMode) -> Cow<'_, str> {
    match mode {
        EscapeMode::DoubleQuotes => html_escape::encode_double_quoted_attribute(text),
        EscapeMode::AllQuotes => html_escape::encode_quoted_attribute(text),
        EscapeMode::Specials => html_escape::encode_text(text),
        EscapeMode::Raw => Cow::Borrowed(text),
    }
}

/// Decode HTML entities back to plain text.
///
/// Mode-independent: named, decimal and hexadecimal entity forms are all
/// recognized, so any output of [`escape`] decodes back to its input.
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}
