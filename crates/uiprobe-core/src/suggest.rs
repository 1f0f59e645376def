//! Next-action suggestions for the current screen.
//!
//! A presentation aid, not a planner: it proposes a handful of
//! plausible interactions in a fixed priority order and never claims
//! completeness.
//!
//! # Heuristics (fixed order, each contributes at most one suggestion
//! except the generic tap rule)
//!
//! 1. A focused input-like element suggests entering text into it.
//! 2. Clickable elements labeled with common dialog-affirmation words
//!    suggest tapping the joined set.
//! 3. Up to 3 other labeled clickable elements (minimum 10×10 px tap
//!    target) suggest tapping by label, only while fewer than 3
//!    suggestions have accumulated.
//! 4. Any scrollable element suggests scrolling.

use crate::element::UiElement;
use crate::semantics::{is_input_like, ScrollDirection};

/// Hard cap on returned suggestions.
const MAX_SUGGESTIONS: usize = 4;

/// Generic tap suggestions added by the third heuristic.
const MAX_GENERIC_TAPS: usize = 3;

/// Minimum tap-target edge for the generic tap rule.
const MIN_TAP_TARGET: i32 = 10;

/// Labels that read as dialog affirmations/dismissals.
const DIALOG_WORDS: &[&str] = &[
    "ok",
    "cancel",
    "yes",
    "no",
    "confirm",
    "dismiss",
    "close",
    "accept",
    "deny",
    "allow",
    "don't allow",
];

fn is_dialog_word(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    DIALOG_WORDS.contains(&lower.as_str())
}

/// Propose up to 4 plausible next interactions.
#[must_use]
pub fn suggest(elements: &[UiElement]) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    // 1. Focused input field.
    if let Some(input) = elements.iter().find(|el| el.focused && is_input_like(el)) {
        let label = input.label();
        if label.is_empty() {
            suggestions.push("Type text into the focused field".to_string());
        } else {
            suggestions.push(format!("Type text into \"{}\"", label));
        }
    }

    // 2. Dialog affirmation buttons, joined into one suggestion.
    let dialog_labels: Vec<String> = elements
        .iter()
        .filter(|el| el.clickable && el.enabled && is_dialog_word(&el.label()))
        .map(|el| format!("\"{}\"", el.label()))
        .collect();
    if !dialog_labels.is_empty() {
        suggestions.push(format!("Tap {}", dialog_labels.join(" or ")));
    }

    // 3. Other labeled clickable elements with a real tap target.
    let mut taps = 0;
    for el in elements {
        if suggestions.len() >= MAX_GENERIC_TAPS || taps >= MAX_GENERIC_TAPS {
            break;
        }
        let label = el.label();
        if el.clickable
            && el.enabled
            && !label.is_empty()
            && !is_dialog_word(&label)
            && el.width >= MIN_TAP_TARGET
            && el.height >= MIN_TAP_TARGET
        {
            suggestions.push(format!("Tap \"{}\"", label));
            taps += 1;
        }
    }

    // 4. Scrolling.
    if let Some(scrollable) = elements.iter().find(|el| el.scrollable) {
        suggestions.push(format!(
            "Scroll {} to see more",
            ScrollDirection::for_element(scrollable).as_str()
        ));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
