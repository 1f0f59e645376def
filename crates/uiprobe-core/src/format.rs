//! Compact text rendering for elements and analyses.
//!
//! Output is written for LLM-agent consumption: one element per line,
//! fixed token order, aggressive truncation, and per-section caps so a
//! busy screen never floods the context window.

use crate::element::UiElement;
use crate::semantics::{input_hint, ScreenAnalysis, ScrollDirection};

/// Characters of element text shown before truncation.
const TEXT_PREVIEW: usize = 50;
/// Characters of content description shown before truncation.
const DESC_PREVIEW: usize = 30;
/// Buttons listed per analysis section.
const MAX_BUTTONS_SHOWN: usize = 15;
/// Static texts listed per analysis section.
const MAX_TEXTS_SHOWN: usize = 10;

/// Rendering options for [`format_tree`].
#[derive(Debug, Clone, Copy)]
pub struct TreeFormat {
    /// Include every element instead of only meaningful ones.
    pub show_all: bool,
    /// Hard cap on rendered elements.
    pub max_elements: usize,
}

impl Default for TreeFormat {
    fn default() -> Self {
        Self {
            show_all: false,
            max_elements: 100,
        }
    }
}

/// Truncate to `max` characters, appending an ellipsis marker.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    }
}

/// The last path segment of a fully qualified class name.
fn short_class(class_name: &str) -> &str {
    class_name.rsplit('.').next().unwrap_or(class_name)
}

/// Render one element on one line.
///
/// Token order is fixed: index, short class, short resource id,
/// truncated text, truncated content description, applicable flags,
/// center coordinates. Empty attributes are omitted entirely.
#[must_use]
pub fn format_element(el: &UiElement) -> String {
    let mut tokens: Vec<String> = vec![format!("[{}]", el.index)];

    if !el.class_name.is_empty() {
        tokens.push(short_class(&el.class_name).to_string());
    }
    if !el.resource_id.is_empty() {
        tokens.push(format!("#{}", el.short_id()));
    }
    if !el.text.is_empty() {
        tokens.push(format!("\"{}\"", truncate(&el.text, TEXT_PREVIEW)));
    }
    if !el.content_desc.is_empty() {
        tokens.push(format!("desc=\"{}\"", truncate(&el.content_desc, DESC_PREVIEW)));
    }

    let mut flags: Vec<&str> = Vec::new();
    if el.clickable {
        flags.push("clickable");
    }
    if el.scrollable {
        flags.push("scrollable");
    }
    if el.focused {
        flags.push("focused");
    }
    if el.checked {
        flags.push("checked");
    }
    if !el.enabled {
        flags.push("disabled");
    }
    if !flags.is_empty() {
        tokens.push(format!("({})", flags.join(", ")));
    }

    tokens.push(format!("@ ({}, {})", el.center_x, el.center_y));
    tokens.join(" ")
}

/// An element worth showing by default: it carries some signal an agent
/// could act on or read.
fn is_meaningful(el: &UiElement) -> bool {
    !el.text.is_empty()
        || !el.content_desc.is_empty()
        || el.clickable
        || el.scrollable
        || el.focusable
        || el.resource_id.contains('/')
}

/// Render a sequence, one element per line.
///
/// Default mode filters to meaningful elements before applying the
/// element cap. An empty post-filter result yields the literal string
/// `"No UI elements found"`.
#[must_use]
pub fn format_tree(elements: &[UiElement], options: &TreeFormat) -> String {
    let lines: Vec<String> = elements
        .iter()
        .filter(|el| options.show_all || is_meaningful(el))
        .take(options.max_elements)
        .map(format_element)
        .collect();

    if lines.is_empty() {
        "No UI elements found".to_string()
    } else {
        lines.join("\n")
    }
}

fn push_capped<T>(
    out: &mut Vec<String>,
    header: &str,
    items: &[T],
    cap: usize,
    mut render: impl FnMut(&T) -> String,
) {
    if items.is_empty() {
        return;
    }
    out.push(header.to_string());
    for item in items.iter().take(cap) {
        out.push(format!("  {}", render(item)));
    }
    if items.len() > cap {
        out.push(format!("  ... +{} more", items.len() - cap));
    }
}

/// Render a screen analysis as grouped sections.
#[must_use]
pub fn format_analysis(analysis: &ScreenAnalysis<'_>) -> String {
    let mut out: Vec<String> = Vec::new();

    if let Some(title) = &analysis.title {
        out.push(format!("Title: {}", title));
    }
    if analysis.has_dialog {
        match &analysis.dialog_title {
            Some(t) => out.push(format!("Dialog: \"{}\"", t)),
            None => out.push("Dialog open".to_string()),
        }
    }

    let nav = &analysis.navigation;
    if nav.has_back || nav.has_menu || nav.has_tabs {
        let mut parts: Vec<String> = Vec::new();
        if nav.has_back {
            parts.push("back".to_string());
        }
        if nav.has_menu {
            parts.push("menu".to_string());
        }
        match &nav.current_tab {
            Some(tab) => parts.push(format!("tab \"{}\"", tab)),
            None if nav.has_tabs => parts.push("tabs".to_string()),
            None => {}
        }
        out.push(format!("Navigation: {}", parts.join(", ")));
    }

    push_capped(&mut out, "Buttons:", &analysis.buttons, MAX_BUTTONS_SHOWN, |el| {
        format!("[{}] {}", el.index, el.label())
    });
    push_capped(&mut out, "Inputs:", &analysis.inputs, analysis.inputs.len(), |el| {
        let hint = input_hint(el);
        let mut line = format!("[{}]", el.index);
        if !hint.is_empty() {
            line.push_str(&format!(" hint=\"{}\"", hint));
        }
        if !el.text.is_empty() {
            line.push_str(&format!(" value=\"{}\"", truncate(&el.text, TEXT_PREVIEW)));
        }
        if el.focused {
            line.push_str(" (focused)");
        }
        line
    });
    push_capped(&mut out, "Texts:", &analysis.texts, MAX_TEXTS_SHOWN, |el| {
        format!("[{}] \"{}\"", el.index, truncate(&el.text, TEXT_PREVIEW))
    });

    if let Some(first) = analysis.scrollables.first() {
        out.push(format!(
            "Scrollable: {}",
            ScrollDirection::for_element(first).as_str()
        ));
    }

    out.push(format!("Summary: {}", analysis.summary));
    out.join("\n")
}
