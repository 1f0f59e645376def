//! Line-oriented parser for desktop hierarchy dumps.
//!
//! The companion desktop process emits one element per line with
//! bracket/quote-delimited fields:
//!
//! ```text
//! <AXButton> text="Sign in" role="button" id="sign_in" @ (120, 240) [200x48]
//! <AXScrollArea> @ (0, 300) [1024x600] scrollable
//! ```
//!
//! | Field | Syntax | Required |
//! |-------|--------|----------|
//! | class | `<Name>` | one of class/text/coords |
//! | text | `text="..."` | one of class/text/coords |
//! | coordinates | `@ (x, y)` | one of class/text/coords |
//! | size | `[WxH]` | no (defaults to 100×40) |
//! | role | `role="..."` | no |
//! | id | `id="..."` | no |
//!
//! A line carrying none of the three minimal signals (class tag, text
//! attribute, coordinate marker) is skipped. Affordances are derived
//! from substring presence (`clickable`, `scrollable`, `disabled`,
//! `focused`, `selected`) and from class/role name heuristics.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::{Bounds, UiElement};

/// Default tap-target size used when a line has no explicit `[WxH]`.
const DEFAULT_WIDTH: i32 = 100;
const DEFAULT_HEIGHT: i32 = 40;

/// Field-extraction patterns, compiled once per process.
struct LineRules {
    class: Regex,
    text: Regex,
    role: Regex,
    id: Regex,
    coords: Regex,
    size: Regex,
}

fn rules() -> &'static LineRules {
    static RULES: OnceLock<LineRules> = OnceLock::new();
    RULES.get_or_init(|| LineRules {
        class: Regex::new(r"<([A-Za-z][A-Za-z0-9_.]*)>").expect("valid class pattern"),
        text: Regex::new(r#"text="([^"]*)""#).expect("valid text pattern"),
        role: Regex::new(r#"role="([^"]*)""#).expect("valid role pattern"),
        id: Regex::new(r#"id="([^"]*)""#).expect("valid id pattern"),
        coords: Regex::new(r"@\s*\((-?\d+),\s*(-?\d+)\)").expect("valid coords pattern"),
        size: Regex::new(r"\[(\d+)x(\d+)\]").expect("valid size pattern"),
    })
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Class or role names that imply a clickable affordance.
const CLICKABLE_CLASS_HINTS: &[&str] = &["button", "link", "menuitem"];
/// Class or role names that imply a scrollable container.
const SCROLLABLE_CLASS_HINTS: &[&str] = &["scrollview", "list", "scroll"];

fn name_matches(name: &str, hints: &[&str]) -> bool {
    let lower = name.to_lowercase();
    hints.iter().any(|h| lower.contains(h))
}

/// Parse one line into an element at `index`, or `None` if the line
/// carries none of the minimal element signals.
fn parse_line(line: &str, index: usize) -> Option<UiElement> {
    let r = rules();

    let class = capture(&r.class, line);
    let text = capture(&r.text, line);
    let coords = r.coords.captures(line);

    if class.is_none() && text.is_none() && coords.is_none() {
        return None;
    }

    let (x, y) = match &coords {
        Some(c) => (
            c[1].parse().unwrap_or(0),
            c[2].parse().unwrap_or(0),
        ),
        None => (0, 0),
    };
    let (w, h) = match r.size.captures(line) {
        Some(c) => (
            c[1].parse().unwrap_or(DEFAULT_WIDTH),
            c[2].parse().unwrap_or(DEFAULT_HEIGHT),
        ),
        None => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    };

    let class = class.unwrap_or("");
    let role = capture(&r.role, line).unwrap_or("");

    let clickable = line.contains("clickable")
        || name_matches(role, CLICKABLE_CLASS_HINTS)
        || name_matches(class, CLICKABLE_CLASS_HINTS);
    let scrollable = line.contains("scrollable")
        || name_matches(class, SCROLLABLE_CLASS_HINTS)
        || role.to_lowercase().contains("scroll");

    // Saturating: a bogus near-i32::MAX coordinate must degrade, not panic.
    let bounds = Bounds::new(x, y, x.saturating_add(w), y.saturating_add(h));
    let el = UiElement::new(index, bounds)
        .with_class_name(class)
        .with_text(text.unwrap_or(""))
        .with_resource_id(capture(&r.id, line).unwrap_or(""))
        .with_content_desc(role)
        .with_clickable(clickable)
        .with_scrollable(scrollable)
        .with_enabled(!line.contains("disabled"))
        .with_focused(line.contains("focused"))
        .with_selected(line.contains("selected"));

    Some(el)
}

/// Parse a line-oriented dump into a flat element sequence.
#[must_use]
pub fn parse(raw: &str) -> Vec<UiElement> {
    let mut elements = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(el) = parse_line(line, elements.len()) {
            elements.push(el);
        }
    }
    elements
}
