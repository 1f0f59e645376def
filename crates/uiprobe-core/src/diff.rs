//! Change detection between two parsed screens.
//!
//! Indices are unstable across parses, so element identity for diffing
//! is a composite fingerprint of `resource_id|text|class_name`. Two
//! elements are "the same" iff the triple matches exactly.
//!
//! The screen-change verdict is churn-based: when more than a threshold
//! fraction of the combined fingerprint set appeared or disappeared,
//! the screen is considered to have transitioned rather than locally
//! updated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::UiElement;

/// Appeared/disappeared entries reported per side, for output brevity.
const MAX_REPORTED: usize = 5;

/// Tunable diff thresholds.
///
/// The 60% default was tuned against Android screen transitions; it is
/// an option rather than a constant because other UI paradigms may
/// churn differently.
#[derive(Debug, Clone, Copy)]
pub struct DiffOptions {
    /// Fraction of fingerprint-union churn above which the screen is
    /// considered changed.
    pub change_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            change_threshold: 0.6,
        }
    }
}

/// Result of comparing two captures of the same session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenDiff {
    pub screen_changed: bool,
    /// Short descriptions of elements present only in `after`, capped at 5.
    pub appeared: Vec<String>,
    /// Short descriptions of elements present only in `before`, capped at 5.
    pub disappeared: Vec<String>,
    pub before_count: usize,
    pub after_count: usize,
}

fn fingerprint(el: &UiElement) -> (&str, &str, &str) {
    (&el.resource_id, &el.text, &el.class_name)
}

/// Short descriptive form used in appeared/disappeared lists:
/// label + class, marked clickable when applicable.
fn describe(el: &UiElement) -> String {
    let label = el.label();
    let class = el
        .class_name
        .rsplit('.')
        .next()
        .unwrap_or(&el.class_name);

    let mut out = if label.is_empty() {
        format!("<{}>", if class.is_empty() { "element" } else { class })
    } else if class.is_empty() {
        format!("\"{}\"", label)
    } else {
        format!("\"{}\" ({})", label, class)
    };
    if el.clickable {
        out.push_str(" [clickable]");
    }
    out
}

/// Compare two element sequences captured at different times.
///
/// `diff(seq, seq)` yields empty lists and `screen_changed = false`;
/// two empty sequences are defined as unchanged.
#[must_use]
pub fn diff(before: &[UiElement], after: &[UiElement], options: &DiffOptions) -> ScreenDiff {
    let before_set: HashSet<_> = before.iter().map(fingerprint).collect();
    let after_set: HashSet<_> = after.iter().map(fingerprint).collect();

    let appeared_set: HashSet<_> = after_set.difference(&before_set).copied().collect();
    let disappeared_set: HashSet<_> = before_set.difference(&after_set).copied().collect();

    // Report elements in sequence order, deduped by fingerprint.
    let mut seen = HashSet::new();
    let appeared: Vec<String> = after
        .iter()
        .filter(|el| appeared_set.contains(&fingerprint(el)) && seen.insert(fingerprint(el)))
        .take(MAX_REPORTED)
        .map(describe)
        .collect();
    seen.clear();
    let disappeared: Vec<String> = before
        .iter()
        .filter(|el| disappeared_set.contains(&fingerprint(el)) && seen.insert(fingerprint(el)))
        .take(MAX_REPORTED)
        .map(describe)
        .collect();

    let union = before_set.union(&after_set).count();
    let churn = appeared_set.len() + disappeared_set.len();
    let screen_changed = union > 0 && churn as f64 / union as f64 > options.change_threshold;

    ScreenDiff {
        screen_changed,
        appeared,
        disappeared,
        before_count: before.len(),
        after_count: after.len(),
    }
}

/// Render a diff as a short multi-line report.
#[must_use]
pub fn format_diff(diff: &ScreenDiff) -> String {
    let mut out = vec![format!(
        "Screen {}: {} -> {} elements",
        if diff.screen_changed {
            "changed"
        } else {
            "unchanged"
        },
        diff.before_count,
        diff.after_count
    )];
    for entry in &diff.appeared {
        out.push(format!("+ {}", entry));
    }
    for entry in &diff.disappeared {
        out.push(format!("- {}", entry));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Bounds;

    fn el(index: usize, text: &str) -> UiElement {
        UiElement::new(index, Bounds::new(0, index as i32 * 50, 200, index as i32 * 50 + 40))
            .with_text(text)
            .with_class_name("android.widget.TextView")
    }

    fn opts() -> DiffOptions {
        DiffOptions::default()
    }

    #[test]
    fn test_identical_sequences_are_unchanged() {
        let seq = vec![el(0, "A"), el(1, "B"), el(2, "C")];
        let d = diff(&seq, &seq, &opts());
        assert!(!d.screen_changed);
        assert!(d.appeared.is_empty());
        assert!(d.disappeared.is_empty());
        assert_eq!(d.before_count, 3);
        assert_eq!(d.after_count, 3);
    }

    #[test]
    fn test_both_empty_is_unchanged() {
        let d = diff(&[], &[], &opts());
        assert!(!d.screen_changed, "zero union is defined as not changed");
    }

    #[test]
    fn test_wholly_distinct_sets_signal_transition() {
        let before = vec![el(0, "A"), el(1, "B"), el(2, "C")];
        let after = vec![el(0, "X"), el(1, "Y"), el(2, "Z")];
        let d = diff(&before, &after, &opts());
        // 6 churn over a union of 6 is 100% > 60%.
        assert!(d.screen_changed);
        assert_eq!(d.appeared.len(), 3);
        assert_eq!(d.disappeared.len(), 3);
    }

    #[test]
    fn test_local_update_is_not_a_transition() {
        let before = vec![el(0, "A"), el(1, "B"), el(2, "C"), el(3, "D"), el(4, "E")];
        let mut after = before.clone();
        after[4] = el(4, "F");
        let d = diff(&before, &after, &opts());
        // 2 churn over a union of 6 is 33% <= 60%.
        assert!(!d.screen_changed);
        assert_eq!(d.appeared, vec!["\"F\" (TextView)"]);
        assert_eq!(d.disappeared, vec!["\"E\" (TextView)"]);
    }

    #[test]
    fn test_index_change_alone_is_not_a_difference() {
        let before = vec![el(0, "A"), el(1, "B")];
        let after = vec![el(5, "B"), el(9, "A")];
        let d = diff(&before, &after, &opts());
        assert!(d.appeared.is_empty(), "fingerprints ignore index and order");
        assert!(d.disappeared.is_empty());
        assert!(!d.screen_changed);
    }

    #[test]
    fn test_reported_lists_are_capped_at_five() {
        let before: Vec<UiElement> = (0..10).map(|i| el(i, &format!("old {}", i))).collect();
        let after: Vec<UiElement> = (0..10).map(|i| el(i, &format!("new {}", i))).collect();
        let d = diff(&before, &after, &opts());
        assert!(d.screen_changed);
        assert_eq!(d.appeared.len(), 5);
        assert_eq!(d.disappeared.len(), 5);
    }

    #[test]
    fn test_clickable_elements_are_marked() {
        let before: Vec<UiElement> = vec![];
        let after = vec![el(0, "OK").with_clickable(true)];
        let d = diff(&before, &after, &opts());
        assert_eq!(d.appeared, vec!["\"OK\" (TextView) [clickable]"]);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let before = vec![el(0, "A"), el(1, "B")];
        let after = vec![el(0, "A"), el(1, "C")];
        // 2 churn over union of 3 is ~67%: changed at the default, not
        // at a stricter threshold.
        assert!(diff(&before, &after, &opts()).screen_changed);
        let strict = DiffOptions {
            change_threshold: 0.9,
        };
        assert!(!diff(&before, &after, &strict).screen_changed);
    }

    #[test]
    fn test_format_diff_lists_both_sides() {
        let before = vec![el(0, "A")];
        let after = vec![el(0, "B")];
        let rendered = format_diff(&diff(&before, &after, &opts()));
        assert!(rendered.contains("+ \"B\" (TextView)"));
        assert!(rendered.contains("- \"A\" (TextView)"));
        assert!(rendered.starts_with("Screen changed"));
    }
}
