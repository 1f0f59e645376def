//! Predicate-based filtering over element sequences.
//!
//! All filters are pure: they borrow the input sequence, never mutate
//! it, and return fresh vectors of references. An empty result is the
//! normal "nothing matched" outcome, never an error.

use serde::{Deserialize, Serialize};

use crate::element::UiElement;

/// Case-insensitive substring match against `text` OR `content_desc`.
#[must_use]
pub fn by_text<'a>(elements: &'a [UiElement], needle: &str) -> Vec<&'a UiElement> {
    let needle = needle.to_lowercase();
    elements
        .iter()
        .filter(|el| {
            el.text.to_lowercase().contains(&needle)
                || el.content_desc.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Substring match against the resource id.
///
/// Matching on substrings supports both fully qualified ids
/// (`com.app:id/login`) and short-form ids (`login`).
#[must_use]
pub fn by_resource_id<'a>(elements: &'a [UiElement], needle: &str) -> Vec<&'a UiElement> {
    elements
        .iter()
        .filter(|el| el.resource_id.contains(needle))
        .collect()
}

/// Substring match against the class name.
#[must_use]
pub fn by_class_name<'a>(elements: &'a [UiElement], needle: &str) -> Vec<&'a UiElement> {
    elements
        .iter()
        .filter(|el| el.class_name.contains(needle))
        .collect()
}

/// All clickable elements, regardless of enabled state.
///
/// Disabled-but-clickable elements are intentionally included: "the
/// button exists but is greyed out" is a useful observation for an
/// agent deciding what to do next.
#[must_use]
pub fn by_clickable(elements: &[UiElement]) -> Vec<&UiElement> {
    elements.iter().filter(|el| el.clickable).collect()
}

/// A conjunction of optional filter criteria.
///
/// Omitted criteria are not applied; the empty criteria set is the
/// identity filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// When set, tests `width > 0 && height > 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Criteria {
    fn matches(&self, el: &UiElement) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !el.text.to_lowercase().contains(&needle)
                && !el.content_desc.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(id) = &self.resource_id {
            if !el.resource_id.contains(id) {
                return false;
            }
        }
        if let Some(class) = &self.class_name {
            if !el.class_name.contains(class) {
                return false;
            }
        }
        if let Some(clickable) = self.clickable {
            if el.clickable != clickable {
                return false;
            }
        }
        if let Some(enabled) = self.enabled {
            if el.enabled != enabled {
                return false;
            }
        }
        if let Some(visible) = self.visible {
            if el.is_visible() != visible {
                return false;
            }
        }
        true
    }
}

/// Filter by the conjunction of all supplied criteria.
#[must_use]
pub fn by_criteria<'a>(elements: &'a [UiElement], criteria: &Criteria) -> Vec<&'a UiElement> {
    elements.iter().filter(|el| criteria.matches(el)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Bounds;

    fn button(index: usize, text: &str) -> UiElement {
        UiElement::new(index, Bounds::new(0, 0, 100, 40))
            .with_text(text)
            .with_class_name("android.widget.Button")
            .with_clickable(true)
    }

    fn fixture() -> Vec<UiElement> {
        vec![
            button(0, "Login"),
            button(1, "Cancel").with_enabled(false),
            UiElement::new(2, Bounds::new(0, 50, 200, 90))
                .with_content_desc("Navigate up")
                .with_resource_id("com.app:id/nav_back")
                .with_class_name("android.widget.ImageButton")
                .with_clickable(true),
            UiElement::new(3, Bounds::new(0, 0, 0, 0)).with_text("hidden"),
        ]
    }

    #[test]
    fn test_by_text_is_case_insensitive_over_text_and_desc() {
        let elements = fixture();
        assert_eq!(by_text(&elements, "LOGIN").len(), 1);
        assert_eq!(by_text(&elements, "navigate")[0].index, 2);
        assert!(by_text(&elements, "missing").is_empty());
    }

    #[test]
    fn test_by_resource_id_matches_both_forms() {
        let elements = fixture();
        assert_eq!(by_resource_id(&elements, "com.app:id/nav_back").len(), 1);
        assert_eq!(by_resource_id(&elements, "nav_back").len(), 1);
    }

    #[test]
    fn test_by_clickable_includes_disabled() {
        let elements = fixture();
        let clickable = by_clickable(&elements);
        assert_eq!(clickable.len(), 3);
        assert!(clickable.iter().any(|el| !el.enabled));
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let elements = fixture();
        let all = by_criteria(&elements, &Criteria::default());
        assert_eq!(all.len(), elements.len());
        let indices: Vec<usize> = all.iter().map(|el| el.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let elements = fixture();
        let crit = Criteria {
            clickable: Some(true),
            enabled: Some(true),
            ..Criteria::default()
        };
        assert_eq!(by_criteria(&elements, &crit).len(), 2);

        let crit = Criteria {
            text: Some("login".into()),
            class_name: Some("Button".into()),
            ..Criteria::default()
        };
        assert_eq!(by_criteria(&elements, &crit).len(), 1);
    }

    #[test]
    fn test_visibility_criterion_tests_area() {
        let elements = fixture();
        let crit = Criteria {
            visible: Some(false),
            ..Criteria::default()
        };
        let hidden = by_criteria(&elements, &crit);
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].text, "hidden");
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let elements = fixture();
        let before = elements.clone();
        let _ = by_text(&elements, "login");
        let _ = by_criteria(&elements, &Criteria::default());
        assert_eq!(elements, before);
    }
}
