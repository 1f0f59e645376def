//! Fuzzy natural-language element matching.
//!
//! Resolves a free-text description ("the submit button") to the single
//! best-matching interactive element, with a confidence value and a
//! human-readable justification. This is what lets an agent act on a
//! screen without knowing coordinates.
//!
//! # Scoring rules (strict priority order, first match wins)
//!
//! | Rule | Score |
//! |------|-------|
//! | Exact text equality | 100 |
//! | Exact content-description equality | 95 |
//! | Text contains description | 80 |
//! | Content-description contains description | 75 |
//! | Deslugged resource id contains description | 60 |
//! | Description word (len > 2) in text | 40 |
//! | Description word (len > 2) in content-description | 35 |
//!
//! Clickable elements receive a flat +10 bonus after rule scoring, a
//! deliberate tie-break favoring interactive matches over passive text
//! with the same label. Candidates are ranked by their unclamped final
//! score, so the bonus stays decisive at the top of the scale (an exact
//! content-description hit on a clickable element, 105, outranks an
//! exact text hit on passive text, 100); only the reported confidence
//! is clamped to 100.
//!
//! Only enabled, visible elements are considered: a greyed-out button
//! must never win a match, even on exact text. Candidates scoring 0 are
//! excluded entirely; no candidates means `None`, which signals "no
//! match", not an error.

use serde::Serialize;

use crate::element::UiElement;

/// Flat bonus applied to clickable candidates after rule scoring.
const CLICKABLE_BONUS: u32 = 10;

/// Minimum word length considered by the word-overlap rules.
const MIN_WORD_LEN: usize = 3;

/// The best match for a description.
///
/// `confidence` is a relative ranking signal on a 0–100 ordinal scale,
/// not a calibrated probability; do not present it as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub element: &'a UiElement,
    pub confidence: u8,
    /// Which rule fired, for explainability.
    pub reason: String,
}

/// Score one candidate against the lowercased description.
///
/// Rules are mutually exclusive per element and evaluated in strict
/// priority order; the first matching rule wins. Returns `None` when no
/// rule matches.
fn score_element(el: &UiElement, description: &str) -> Option<(u32, String)> {
    let text = el.text.to_lowercase();
    let desc = el.content_desc.to_lowercase();
    let id_spaced = el.deslugged_id().to_lowercase();
    let id_raw = el.short_id().to_lowercase();

    if !text.is_empty() && text == description {
        return Some((100, format!("exact text match \"{}\"", el.text)));
    }
    if !desc.is_empty() && desc == description {
        return Some((
            95,
            format!("exact content description match \"{}\"", el.content_desc),
        ));
    }
    if !text.is_empty() && text.contains(description) {
        return Some((80, format!("text \"{}\" contains description", el.text)));
    }
    if !desc.is_empty() && desc.contains(description) {
        return Some((
            75,
            format!("content description \"{}\" contains description", el.content_desc),
        ));
    }
    // The id is checked in both its underscore and space form, so
    // "login button" and "login_button" both hit com.app:id/login_button.
    if !id_raw.is_empty() && (id_spaced.contains(description) || id_raw.contains(description)) {
        return Some((
            60,
            format!("resource id \"{}\" contains description", el.short_id()),
        ));
    }

    let words: Vec<&str> = description
        .split_whitespace()
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .collect();
    if let Some(word) = words.iter().find(|w| !text.is_empty() && text.contains(**w)) {
        return Some((40, format!("text contains word \"{}\"", word)));
    }
    if let Some(word) = words.iter().find(|w| !desc.is_empty() && desc.contains(**w)) {
        return Some((
            35,
            format!("content description contains word \"{}\"", word),
        ));
    }

    None
}

/// Find the best-matching enabled, visible element for a description.
///
/// Candidates are compared on the unclamped score (rule score plus
/// clickable bonus); ties are broken by original sequence order.
#[must_use]
pub fn find_best_match<'a>(
    elements: &'a [UiElement],
    description: &str,
) -> Option<MatchResult<'a>> {
    let description = description.trim().to_lowercase();
    if description.is_empty() {
        return None;
    }

    let mut best: Option<MatchResult<'a>> = None;
    let mut best_score = 0u32;
    for el in elements {
        if !el.enabled || !el.is_visible() {
            continue;
        }
        let Some((rule_score, mut reason)) = score_element(el, &description) else {
            continue;
        };

        let mut score = rule_score;
        if el.clickable {
            score += CLICKABLE_BONUS;
            reason.push_str(" (clickable)");
        }

        // Ranking uses the unclamped score; clamping happens only on
        // the reported confidence. Strict comparison keeps the earliest
        // element on ties.
        if best.is_none() || score > best_score {
            best_score = score;
            best = Some(MatchResult {
                element: el,
                confidence: score.min(100) as u8,
                reason,
            });
        }
    }
    best
}
