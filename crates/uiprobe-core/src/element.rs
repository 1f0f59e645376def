//! The flat UI element model.
//!
//! Every analysis in this crate operates on one data type: an ordered
//! sequence of [`UiElement`] values with absolute screen bounds. No tree
//! structure is retained after parsing; parent/child relationships are
//! recovered where needed (dialog titles) by bounds containment.
//!
//! # Coordinates
//!
//! Bounds are `x1,y1,x2,y2` in integer screen pixels with `x2 >= x1` and
//! `y2 >= y1` (normalized at construction). Zero-area bounds are valid
//! and denote invisible elements.
//!
//! # Derived fields
//!
//! `center_x`, `center_y`, `width`, and `height` are computed from the
//! bounds at construction time and are always consistent with them.
//! Elements are immutable after construction; there is no way to move
//! an element without rebuilding it.

use serde::{Deserialize, Serialize};

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    /// Create bounds, normalizing reversed corners so that `x2 >= x1`
    /// and `y2 >= y1` always hold.
    #[must_use]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Midpoint, `floor((x1 + x2) / 2)`. Computed in i64 so that
    /// coordinate pairs near the i32 limits cannot overflow, and floored
    /// (not truncated) so negative off-screen coordinates round the same
    /// way as positive ones.
    #[must_use]
    pub fn center_x(&self) -> i32 {
        (i64::from(self.x1) + i64::from(self.x2)).div_euclid(2) as i32
    }

    #[must_use]
    pub fn center_y(&self) -> i32 {
        (i64::from(self.y1) + i64::from(self.y2)).div_euclid(2) as i32
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Whether `other` is fully nested inside these bounds (containment
    /// on all four edges, equality allowed).
    #[must_use]
    pub fn contains(&self, other: &Bounds) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}

/// Helper for serde skip_serializing_if.
fn is_false(b: &bool) -> bool {
    !*b
}

/// A single node from an accessibility dump, flattened.
///
/// String attributes use the empty string for absence; `None` never
/// appears here, so callers compare against `""` instead of unwrapping.
///
/// `index` is the sequential position assigned at parse time. It is
/// stable within one parse call only and must never be treated as a
/// persistent identity across parses (see `session::SnapshotCache`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub index: usize,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_desc: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub checkable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub clickable: bool,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub focusable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub focused: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub scrollable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub long_clickable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub password: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,

    pub bounds: Bounds,

    /// Derived from `bounds`; always consistent with it.
    pub center_x: i32,
    pub center_y: i32,
    pub width: i32,
    pub height: i32,
}

impl UiElement {
    /// Create an element at `index` with the given bounds.
    ///
    /// All string attributes start empty and all flags start false,
    /// except `enabled` which defaults to true: a dump that omits the
    /// attribute describes a normal, interactable node, and defaulting
    /// to disabled would silently exclude the whole screen from fuzzy
    /// matching.
    #[must_use]
    pub fn new(index: usize, bounds: Bounds) -> Self {
        Self {
            index,
            resource_id: String::new(),
            class_name: String::new(),
            package_name: String::new(),
            text: String::new(),
            content_desc: String::new(),
            checkable: false,
            checked: false,
            clickable: false,
            enabled: true,
            focusable: false,
            focused: false,
            scrollable: false,
            long_clickable: false,
            password: false,
            selected: false,
            center_x: bounds.center_x(),
            center_y: bounds.center_y(),
            width: bounds.width(),
            height: bounds.height(),
            bounds,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_content_desc(mut self, desc: impl Into<String>) -> Self {
        self.content_desc = desc.into();
        self
    }

    #[must_use]
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = id.into();
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    #[must_use]
    pub fn with_package_name(mut self, package: impl Into<String>) -> Self {
        self.package_name = package.into();
        self
    }

    #[must_use]
    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Whether the element occupies any screen area.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// The portion of the resource id after the last `/` separator.
    ///
    /// `com.app:id/login_button` → `login_button`. Returns the full id
    /// when no separator is present (short-form ids).
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.resource_id
            .rsplit('/')
            .next()
            .unwrap_or(self.resource_id.as_str())
    }

    /// The resource id stripped of its package/type prefix with
    /// underscores replaced by spaces, for human-readable matching.
    ///
    /// `com.app:id/login_button` → `login button`.
    #[must_use]
    pub fn deslugged_id(&self) -> String {
        self.short_id().replace('_', " ")
    }

    /// Best human-readable label: text, else content description, else
    /// the deslugged resource id. Empty string when none is present.
    #[must_use]
    pub fn label(&self) -> String {
        if !self.text.is_empty() {
            self.text.clone()
        } else if !self.content_desc.is_empty() {
            self.content_desc.clone()
        } else {
            self.deslugged_id()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalizes_reversed_corners() {
        let b = Bounds::new(100, 900, 980, 800);
        assert_eq!(b, Bounds::new(100, 800, 980, 900));
        assert!(b.width() >= 0 && b.height() >= 0);
    }

    #[test]
    fn test_derived_fields_match_bounds() {
        let el = UiElement::new(0, Bounds::new(100, 800, 980, 900));
        assert_eq!(el.center_x, 540);
        assert_eq!(el.center_y, 850);
        assert_eq!(el.width, 880);
        assert_eq!(el.height, 100);
        assert_eq!(el.center_x, el.bounds.center_x());
        assert_eq!(el.center_y, el.bounds.center_y());
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let b = Bounds::new(i32::MAX - 1, 0, i32::MAX, 10);
        assert_eq!(b.width(), 1);
        assert_eq!(b.center_x(), i32::MAX - 1);

        let full = Bounds::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(full.width(), i32::MAX, "width saturates instead of wrapping");
        assert_eq!(full.center_x(), -1);
        let el = UiElement::new(0, full);
        assert!(el.is_visible());
    }

    #[test]
    fn test_center_floors_for_negative_sums() {
        // floor(-11 / 2) is -6; truncation would give -5.
        let b = Bounds::new(-7, -7, -4, -4);
        assert_eq!(b.center_x(), -6);
        assert_eq!(b.center_y(), -6);
    }

    #[test]
    fn test_zero_area_bounds_are_invisible() {
        let el = UiElement::new(0, Bounds::new(10, 10, 10, 10));
        assert!(!el.is_visible());
    }

    #[test]
    fn test_containment_allows_shared_edges() {
        let outer = Bounds::new(0, 0, 100, 100);
        assert!(outer.contains(&Bounds::new(0, 0, 100, 100)));
        assert!(outer.contains(&Bounds::new(10, 10, 90, 90)));
        assert!(!outer.contains(&Bounds::new(10, 10, 110, 90)));
    }

    #[test]
    fn test_short_id_handles_both_forms() {
        let qualified = UiElement::new(0, Bounds::default())
            .with_resource_id("com.example.app:id/submit_button");
        assert_eq!(qualified.short_id(), "submit_button");
        assert_eq!(qualified.deslugged_id(), "submit button");

        let short = UiElement::new(0, Bounds::default()).with_resource_id("submit_button");
        assert_eq!(short.short_id(), "submit_button");
    }

    #[test]
    fn test_label_prefers_text_then_desc_then_id() {
        let base = UiElement::new(0, Bounds::default()).with_resource_id("app:id/ok_button");
        assert_eq!(base.label(), "ok button");
        assert_eq!(base.clone().with_content_desc("Confirm").label(), "Confirm");
        assert_eq!(
            base.with_content_desc("Confirm").with_text("OK").label(),
            "OK"
        );
    }

    #[test]
    fn test_serialization_omits_empty_attributes() {
        let el = UiElement::new(0, Bounds::new(0, 0, 10, 10));
        let json = serde_json::to_string(&el).unwrap();
        assert!(!json.contains("resource_id"));
        assert!(!json.contains("clickable"));
        assert!(json.contains("\"enabled\":true"));
    }
}
