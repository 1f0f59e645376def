//! Attributed-markup parser for Android-style accessibility dumps.
//!
//! Each node is a self-describing tag carrying named attributes:
//!
//! ```text
//! <node index="3" text="Login" resource-id="com.app:id/login_button"
//!       class="android.widget.Button" package="com.app"
//!       clickable="true" enabled="true" bounds="[100,800][980,900]"/>
//! ```
//!
//! Attributes are collected into a name→value map per node, then
//! projected into typed element fields with explicit defaulting. A node
//! lacking a parseable `bounds` attribute is silently skipped; the
//! surrounding nodes still parse, so a truncated dump degrades to a
//! partial sequence rather than an error.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::{Bounds, UiElement};

/// Typed access over a node's raw attribute map.
///
/// Absence and emptiness are equivalent: `str_attr` returns `""` for a
/// missing attribute, and `bool_attr` treats anything but the literal
/// `"true"` as false.
struct AttrMap(HashMap<String, String>);

impl AttrMap {
    fn from_tag(tag: &BytesStart<'_>) -> Self {
        let mut map = HashMap::new();
        for attr in tag.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_default();
            map.insert(key, value);
        }
        Self(map)
    }

    fn str_attr(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    fn bool_attr(&self, name: &str) -> bool {
        self.str_attr(name) == "true"
    }

    /// Like `bool_attr` but with an explicit default when the attribute
    /// is absent entirely.
    fn bool_attr_or(&self, name: &str, default: bool) -> bool {
        match self.0.get(name) {
            Some(v) => v == "true",
            None => default,
        }
    }
}

/// Parse an Android-style bounds attribute: `[x1,y1][x2,y2]`.
///
/// Returns `None` for anything that does not match, including partial
/// or non-numeric coordinates.
fn parse_bounds(raw: &str) -> Option<Bounds> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let (first, second) = inner.split_once("][")?;
    let (x1, y1) = split_pair(first)?;
    let (x2, y2) = split_pair(second)?;
    Some(Bounds::new(x1, y1, x2, y2))
}

fn split_pair(s: &str) -> Option<(i32, i32)> {
    let (a, b) = s.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Project one node's attributes into an element at `index`.
///
/// Returns `None` when the node has no parseable bounds (the skip rule).
fn project_node(attrs: &AttrMap, index: usize) -> Option<UiElement> {
    let bounds = parse_bounds(attrs.str_attr("bounds"))?;

    let mut el = UiElement::new(index, bounds)
        .with_resource_id(attrs.str_attr("resource-id"))
        .with_class_name(attrs.str_attr("class"))
        .with_package_name(attrs.str_attr("package"))
        .with_text(attrs.str_attr("text"))
        .with_content_desc(attrs.str_attr("content-desc"));

    el.checkable = attrs.bool_attr("checkable");
    el.checked = attrs.bool_attr("checked");
    el.clickable = attrs.bool_attr("clickable");
    // A node that omits "enabled" describes a normal interactable
    // widget; only an explicit "false" disables it.
    el.enabled = attrs.bool_attr_or("enabled", true);
    el.focusable = attrs.bool_attr("focusable");
    el.focused = attrs.bool_attr("focused");
    el.scrollable = attrs.bool_attr("scrollable");
    el.long_clickable = attrs.bool_attr("long-clickable");
    el.password = attrs.bool_attr("password");
    el.selected = attrs.bool_attr("selected");

    Some(el)
}

/// Parse attributed markup into a flat element sequence.
///
/// Any tag with a parseable `bounds` attribute becomes an element;
/// container tags without bounds (`<hierarchy>`, `<?xml ...?>`) and
/// malformed nodes are skipped. A reader error mid-document ends the
/// scan, keeping everything parsed up to that point.
#[must_use]
pub fn parse(raw: &str) -> Vec<UiElement> {
    let mut reader = Reader::from_str(raw);
    let mut elements = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) | Ok(Event::Empty(tag)) => {
                let attrs = AttrMap::from_tag(&tag);
                if let Some(el) = project_node(&attrs, elements.len()) {
                    elements.push(el);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }

    elements
}
