//! Hierarchy dump parsing.
//!
//! Converts a platform-native tree representation into the flat
//! [`UiElement`](crate::element::UiElement) sequence everything else in
//! this crate consumes. Two input formats are supported:
//!
//! | Format | Source | Module |
//! |--------|--------|--------|
//! | Attributed markup (`<node ... bounds="[0,0][1080,1920]"/>`) | Android-style accessibility dump | [`markup`] |
//! | Line-oriented text (`<AXButton> text="OK" @ (10, 20) [80x40]`) | Companion desktop process | [`text`] |
//!
//! # Degradation, not failure
//!
//! Accessibility dumps from real devices are frequently truncated or
//! instrumented inconsistently (mid-animation captures, permission-limited
//! nodes). Parsing therefore never returns an error: malformed nodes are
//! skipped individually, and empty or unrecognizable input produces an
//! empty sequence.

pub mod markup;
pub mod text;

use crate::element::UiElement;

/// Recognized dump formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// Attributed XML-like markup with self-describing nodes.
    Markup,
    /// One element per line, bracket/quote-delimited fields.
    Text,
}

/// Guess the dump format from its content.
///
/// Markup dumps carry `<node`, `<?xml`, or `<hierarchy` markers; the
/// desktop text format uses angle brackets only for the class tag and
/// never contains those markers.
#[must_use]
pub fn detect_format(raw: &str) -> DumpFormat {
    if raw.contains("<node") || raw.contains("<?xml") || raw.contains("<hierarchy") {
        DumpFormat::Markup
    } else {
        DumpFormat::Text
    }
}

/// Parse a raw hierarchy dump into a flat element sequence.
///
/// Auto-detects the format. Indices are assigned sequentially over the
/// emitted (non-skipped) elements, starting at 0, and are only valid
/// against this exact sequence.
#[must_use]
pub fn parse(raw: &str) -> Vec<UiElement> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match detect_format(raw) {
        DumpFormat::Markup => markup::parse(raw),
        DumpFormat::Text => text::parse(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(parse("").is_empty());
        assert!(parse("   \n  ").is_empty());
    }

    #[test]
    fn test_detects_android_markup() {
        let dump = r#"<hierarchy><node bounds="[0,0][10,10]"/></hierarchy>"#;
        assert_eq!(detect_format(dump), DumpFormat::Markup);
        assert_eq!(parse(dump).len(), 1);
    }

    #[test]
    fn test_detects_desktop_text_dump() {
        let dump = r#"<AXButton> text="OK" @ (10, 20) [80x40]"#;
        assert_eq!(detect_format(dump), DumpFormat::Text);
        assert_eq!(parse(dump).len(), 1);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let dump = r#"<hierarchy>
            <node text="A" bounds="[0,0][10,10]"/>
            <node text="B" bounds="[0,10][10,20]"/>
        </hierarchy>"#;
        assert_eq!(parse(dump), parse(dump));
    }
}
