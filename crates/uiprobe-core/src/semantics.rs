//! Screen semantics: deriving higher-level facts from the element list.
//!
//! [`analyze`] classifies a flat element sequence into a
//! [`ScreenAnalysis`]: screen title, dialog/modal presence, navigation
//! affordances, and grouped buttons/inputs/texts/scrollables, plus a
//! synthesized one-line summary. The analysis is a non-owning view; it
//! borrows the source elements and never mutates them.
//!
//! Classification is driven by class-name family tables rather than
//! branching logic, so support for a new UI framework is a matter of
//! adding fragments to the tables. All matching is case-insensitive
//! substring matching on the class name.

use crate::element::UiElement;

/// Classes that name a toolbar/header/navigation-bar.
const TOOLBAR_CLASSES: &[&str] = &[
    "toolbar",
    "actionbar",
    "appbar",
    "navigationbar",
    "navbar",
    "header",
];

/// Classes that name a dialog/modal surface.
const DIALOG_CLASSES: &[&str] = &["dialog", "modal", "bottomsheet", "popup", "alert"];

/// Classes that name a text-entry widget.
const INPUT_CLASSES: &[&str] = &[
    "edittext",
    "textfield",
    "textinput",
    "textarea",
    "searchbox",
    "securetextfield",
];

/// Classes that name a static text widget.
const TEXT_CLASSES: &[&str] = &["textview", "statictext", "label", "text"];

/// Classes that name a tab container.
const TAB_CLASSES: &[&str] = &["tablayout", "tabbar", "bottomnavigation"];

/// Content-description / resource-id fragments signaling a back affordance.
const BACK_HINTS: &[&str] = &["back", "navigate up"];

/// Content-description / resource-id fragments signaling a menu affordance.
const MENU_HINTS: &[&str] = &["menu", "more options", "overflow", "hamburger"];

/// Vertical region (px from top) searched for a fallback title.
const TITLE_MAX_Y: i32 = 200;
/// Minimum width for a fallback title candidate.
const TITLE_MIN_WIDTH: i32 = 200;
/// Static texts reported per analysis, for output economy.
const MAX_TEXTS: usize = 20;

fn class_matches(el: &UiElement, family: &[&str]) -> bool {
    let lower = el.class_name.to_lowercase();
    family.iter().any(|f| lower.contains(f))
}

/// Whether the element is a text-entry widget by class family.
pub(crate) fn is_input_like(el: &UiElement) -> bool {
    class_matches(el, INPUT_CLASSES)
}

fn is_text_view_like(el: &UiElement) -> bool {
    // "text" alone would also hit EditText-style widgets; inputs are
    // their own group.
    class_matches(el, TEXT_CLASSES) && !class_matches(el, INPUT_CLASSES)
}

fn is_container_like(el: &UiElement) -> bool {
    // Text and input widgets can never be dialog cards, whatever their
    // class suffix says.
    if is_text_view_like(el) || is_input_like(el) {
        return false;
    }
    let lower = el.class_name.to_lowercase();
    lower.contains("frame")
        || lower.contains("card")
        || lower.contains("layout")
        || lower.ends_with("view")
}

fn hint_matches(el: &UiElement, hints: &[&str]) -> bool {
    let desc = el.content_desc.to_lowercase();
    let id = el.resource_id.to_lowercase();
    hints
        .iter()
        .any(|h| desc.contains(h) || id.contains(h))
}

/// Tunable thresholds for screen analysis.
///
/// The dialog area-ratio window was tuned against Android's typical
/// dialog conventions; desktop UI paradigms may need different values,
/// which is why it is an option rather than a constant.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Dialog-card candidates must cover at least this fraction of the
    /// largest element's area.
    pub dialog_min_area_ratio: f64,
    /// ... and at most this fraction.
    pub dialog_max_area_ratio: f64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            dialog_min_area_ratio: 0.30,
            dialog_max_area_ratio: 0.85,
        }
    }
}

/// Scroll direction inferred from element proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Vertical,
    Horizontal,
}

impl ScrollDirection {
    /// Taller-than-wide scrolls vertically, everything else horizontally.
    #[must_use]
    pub fn for_element(el: &UiElement) -> Self {
        if el.height > el.width {
            ScrollDirection::Vertical
        } else {
            ScrollDirection::Horizontal
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollDirection::Vertical => "vertical",
            ScrollDirection::Horizontal => "horizontal",
        }
    }
}

/// Detected navigation affordances. The three flags are independent;
/// none are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub has_back: bool,
    pub has_menu: bool,
    pub has_tabs: bool,
    /// Text of the currently selected tab, when one is identifiable.
    pub current_tab: Option<String>,
}

/// A categorized, non-owning view over one parsed screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenAnalysis<'a> {
    pub title: Option<String>,
    pub has_dialog: bool,
    pub dialog_title: Option<String>,
    pub navigation: Navigation,
    /// Enabled clickable elements with a non-empty label.
    pub buttons: Vec<&'a UiElement>,
    /// Text-entry widgets, by class family.
    pub inputs: Vec<&'a UiElement>,
    /// Non-clickable static texts, capped at 20 entries.
    pub texts: Vec<&'a UiElement>,
    pub scrollables: Vec<&'a UiElement>,
    /// One-line digest; exactly `"Empty screen"` when nothing was found.
    pub summary: String,
}

/// The hint shown for an input field: content description, else the
/// deslugged resource id.
#[must_use]
pub fn input_hint(el: &UiElement) -> String {
    if !el.content_desc.is_empty() {
        el.content_desc.clone()
    } else {
        el.deslugged_id()
    }
}

fn detect_title(elements: &[UiElement]) -> Option<String> {
    // Explicit toolbar/header with its own text wins.
    if let Some(el) = elements
        .iter()
        .find(|el| class_matches(el, TOOLBAR_CLASSES) && !el.text.is_empty())
    {
        return Some(el.text.clone());
    }
    // Fallback: a prominent static text near the top of the screen.
    elements
        .iter()
        .find(|el| {
            !el.clickable
                && !el.text.is_empty()
                && el.bounds.y1 < TITLE_MAX_Y
                && el.width > TITLE_MIN_WIDTH
                && is_text_view_like(el)
        })
        .map(|el| el.text.clone())
}

/// First text-view-like element with text fully nested inside `host`.
fn nested_title<'a>(host: &UiElement, elements: &'a [UiElement]) -> Option<&'a UiElement> {
    elements.iter().find(|el| {
        el.index != host.index
            && !el.text.is_empty()
            && !el.clickable
            && is_text_view_like(el)
            && host.bounds.contains(&el.bounds)
    })
}

fn detect_dialog(
    elements: &[UiElement],
    options: &AnalyzerOptions,
) -> (bool, Option<String>) {
    // Explicit dialog/modal class.
    if let Some(dialog) = elements.iter().find(|el| class_matches(el, DIALOG_CLASSES)) {
        let title = nested_title(dialog, elements).map(|el| el.text.clone());
        return (true, title);
    }

    // Heuristic fallback: a container covering a mid-sized fraction of
    // the largest element, offset from the top-left corner, reads as a
    // dialog card even without a dialog class.
    let largest = elements.iter().map(|el| el.bounds.area()).max().unwrap_or(0);
    if largest <= 0 {
        return (false, None);
    }
    for el in elements {
        if !is_container_like(el) || el.bounds.x1 <= 0 || el.bounds.y1 <= 0 {
            continue;
        }
        let ratio = el.bounds.area() as f64 / largest as f64;
        if ratio >= options.dialog_min_area_ratio && ratio <= options.dialog_max_area_ratio {
            let title = nested_title(el, elements).map(|t| t.text.clone());
            return (true, title);
        }
    }
    (false, None)
}

fn detect_navigation(elements: &[UiElement]) -> Navigation {
    let mut nav = Navigation::default();
    for el in elements {
        if hint_matches(el, BACK_HINTS) || el.class_name.to_lowercase().contains("backbutton") {
            nav.has_back = true;
        }
        if hint_matches(el, MENU_HINTS) {
            nav.has_menu = true;
        }
        if class_matches(el, TAB_CLASSES) {
            nav.has_tabs = true;
        }
        if nav.current_tab.is_none() && el.selected && !el.text.is_empty() {
            let lower_class = el.class_name.to_lowercase();
            let lower_id = el.resource_id.to_lowercase();
            if lower_class.contains("tab") || lower_id.contains("tab") {
                nav.has_tabs = true;
                nav.current_tab = Some(el.text.clone());
            }
        }
    }
    nav
}

fn build_summary(analysis: &ScreenAnalysis<'_>, activity_hint: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    let screen_name = activity_hint
        .map(str::to_string)
        .or_else(|| analysis.title.clone());
    if let Some(name) = screen_name {
        parts.push(format!("Screen: {}", name));
    }

    if analysis.has_dialog {
        match &analysis.dialog_title {
            Some(title) => parts.push(format!("Dialog: \"{}\"", title)),
            None => parts.push("Dialog open".to_string()),
        }
    }

    if !analysis.buttons.is_empty() {
        let samples: Vec<String> = analysis
            .buttons
            .iter()
            .take(5)
            .map(|el| el.label())
            .collect();
        let noun = if analysis.buttons.len() == 1 {
            "button"
        } else {
            "buttons"
        };
        parts.push(format!(
            "{} {}: {}",
            analysis.buttons.len(),
            noun,
            samples.join(", ")
        ));
    }

    if !analysis.inputs.is_empty() {
        let noun = if analysis.inputs.len() == 1 {
            "input field"
        } else {
            "input fields"
        };
        parts.push(format!("{} {}", analysis.inputs.len(), noun));
    }

    if let Some(first) = analysis.scrollables.first() {
        parts.push(format!(
            "scrollable {}",
            ScrollDirection::for_element(first).as_str()
        ));
    }

    if analysis.navigation.has_back {
        parts.push("back available".to_string());
    }
    if analysis.navigation.has_menu {
        parts.push("menu available".to_string());
    }
    if let Some(tab) = &analysis.navigation.current_tab {
        parts.push(format!("tab \"{}\" selected", tab));
    } else if analysis.navigation.has_tabs {
        parts.push("tabs present".to_string());
    }

    if parts.is_empty() {
        "Empty screen".to_string()
    } else {
        parts.join("; ")
    }
}

/// Analyze a parsed screen.
///
/// `activity_hint` is an optional platform-provided screen/activity
/// name used in the summary when present. All components are total over
/// well-formed sequences; an empty sequence yields an empty analysis
/// with the `"Empty screen"` summary.
#[must_use]
pub fn analyze<'a>(
    elements: &'a [UiElement],
    activity_hint: Option<&str>,
    options: &AnalyzerOptions,
) -> ScreenAnalysis<'a> {
    let title = detect_title(elements);
    let (has_dialog, dialog_title) = detect_dialog(elements, options);
    let navigation = detect_navigation(elements);

    let buttons: Vec<&UiElement> = elements
        .iter()
        .filter(|el| el.enabled && el.clickable && !el.label().is_empty())
        .collect();
    let inputs: Vec<&UiElement> = elements.iter().filter(|el| is_input_like(el)).collect();
    let texts: Vec<&UiElement> = elements
        .iter()
        .filter(|el| !el.clickable && !el.text.is_empty() && is_text_view_like(el))
        .take(MAX_TEXTS)
        .collect();
    let scrollables: Vec<&UiElement> = elements.iter().filter(|el| el.scrollable).collect();

    let mut analysis = ScreenAnalysis {
        title,
        has_dialog,
        dialog_title,
        navigation,
        buttons,
        inputs,
        texts,
        scrollables,
        summary: String::new(),
    };
    analysis.summary = build_summary(&analysis, activity_hint);
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Bounds;

    fn full_screen(index: usize) -> UiElement {
        UiElement::new(index, Bounds::new(0, 0, 1080, 1920))
            .with_class_name("android.widget.FrameLayout")
    }

    fn text_view(index: usize, text: &str, bounds: Bounds) -> UiElement {
        UiElement::new(index, bounds)
            .with_text(text)
            .with_class_name("android.widget.TextView")
    }

    fn button(index: usize, text: &str, bounds: Bounds) -> UiElement {
        UiElement::new(index, bounds)
            .with_text(text)
            .with_class_name("android.widget.Button")
            .with_clickable(true)
    }

    fn opts() -> AnalyzerOptions {
        AnalyzerOptions::default()
    }

    #[test]
    fn test_empty_screen_summary_is_literal() {
        let analysis = analyze(&[], None, &opts());
        assert_eq!(analysis.summary, "Empty screen");
        assert!(!analysis.has_dialog);
        assert!(analysis.buttons.is_empty());
    }

    #[test]
    fn test_toolbar_text_becomes_title() {
        let elements = vec![
            UiElement::new(0, Bounds::new(0, 0, 1080, 150))
                .with_class_name("androidx.appcompat.widget.Toolbar")
                .with_text("Inbox"),
        ];
        let analysis = analyze(&elements, None, &opts());
        assert_eq!(analysis.title.as_deref(), Some("Inbox"));
    }

    #[test]
    fn test_title_falls_back_to_prominent_top_text() {
        let elements = vec![
            text_view(0, "Account settings", Bounds::new(40, 60, 900, 140)),
            text_view(1, "Way down the page", Bounds::new(40, 1500, 900, 1560)),
        ];
        let analysis = analyze(&elements, None, &opts());
        assert_eq!(analysis.title.as_deref(), Some("Account settings"));
    }

    #[test]
    fn test_narrow_or_low_texts_are_not_titles() {
        let narrow = vec![text_view(0, "12:30", Bounds::new(0, 0, 150, 40))];
        assert_eq!(analyze(&narrow, None, &opts()).title, None);

        let low = vec![text_view(0, "Footer", Bounds::new(0, 1800, 900, 1860))];
        assert_eq!(analyze(&low, None, &opts()).title, None);
    }

    #[test]
    fn test_explicit_dialog_class_with_nested_title() {
        let elements = vec![
            full_screen(0),
            UiElement::new(1, Bounds::new(100, 600, 980, 1300))
                .with_class_name("android.app.AlertDialog"),
            text_view(2, "Discard draft?", Bounds::new(140, 650, 940, 720)),
            text_view(3, "Outside the dialog", Bounds::new(0, 1800, 500, 1860)),
        ];
        let analysis = analyze(&elements, None, &opts());
        assert!(analysis.has_dialog);
        assert_eq!(analysis.dialog_title.as_deref(), Some("Discard draft?"));
    }

    #[test]
    fn test_dialog_fallback_uses_area_ratio_window() {
        // Card covers ~45% of the full-screen root, offset from origin.
        let elements = vec![
            full_screen(0),
            UiElement::new(1, Bounds::new(90, 500, 990, 1540))
                .with_class_name("android.widget.FrameLayout"),
            text_view(2, "Rate this app", Bounds::new(130, 560, 950, 630)),
        ];
        let analysis = analyze(&elements, None, &opts());
        assert!(analysis.has_dialog);
        assert_eq!(analysis.dialog_title.as_deref(), Some("Rate this app"));
    }

    #[test]
    fn test_full_bleed_container_is_not_a_dialog() {
        let elements = vec![full_screen(0), full_screen(1)];
        let analysis = analyze(&elements, None, &opts());
        assert!(!analysis.has_dialog, "100% area ratio is outside the window");
    }

    #[test]
    fn test_navigation_detection_is_independent() {
        let elements = vec![
            UiElement::new(0, Bounds::new(0, 0, 100, 100))
                .with_content_desc("Navigate up")
                .with_clickable(true),
            UiElement::new(1, Bounds::new(980, 0, 1080, 100))
                .with_resource_id("com.app:id/overflow_menu")
                .with_clickable(true),
            UiElement::new(2, Bounds::new(0, 1800, 1080, 1920))
                .with_class_name("com.google.android.material.tabs.TabLayout"),
            UiElement::new(3, Bounds::new(0, 1800, 360, 1920))
                .with_class_name("android.widget.TabWidget")
                .with_text("Home")
                .with_selected(true),
        ];
        let nav = analyze(&elements, None, &opts()).navigation;
        assert!(nav.has_back);
        assert!(nav.has_menu);
        assert!(nav.has_tabs);
        assert_eq!(nav.current_tab.as_deref(), Some("Home"));
    }

    #[test]
    fn test_buttons_require_enabled_and_labeled() {
        let elements = vec![
            button(0, "Save", Bounds::new(0, 0, 200, 80)),
            button(1, "Cancel", Bounds::new(0, 100, 200, 180)).with_enabled(false),
            UiElement::new(2, Bounds::new(0, 200, 80, 280)).with_clickable(true),
        ];
        let analysis = analyze(&elements, None, &opts());
        assert_eq!(analysis.buttons.len(), 1);
        assert_eq!(analysis.buttons[0].text, "Save");
    }

    #[test]
    fn test_inputs_grouped_by_class_family_with_hints() {
        let elements = vec![UiElement::new(0, Bounds::new(0, 0, 500, 80))
            .with_class_name("android.widget.EditText")
            .with_resource_id("com.app:id/email_address")
            .with_text("user@example.com")];
        let analysis = analyze(&elements, None, &opts());
        assert_eq!(analysis.inputs.len(), 1);
        assert_eq!(input_hint(analysis.inputs[0]), "email address");
        assert_eq!(analysis.inputs[0].text, "user@example.com");
    }

    #[test]
    fn test_edit_text_is_not_a_static_text() {
        let elements = vec![UiElement::new(0, Bounds::new(0, 0, 500, 80))
            .with_class_name("android.widget.EditText")
            .with_text("typed value")];
        let analysis = analyze(&elements, None, &opts());
        assert!(analysis.texts.is_empty());
        assert_eq!(analysis.inputs.len(), 1);
    }

    #[test]
    fn test_texts_are_capped() {
        let elements: Vec<UiElement> = (0..30)
            .map(|i| {
                text_view(
                    i,
                    &format!("row {}", i),
                    Bounds::new(0, i as i32 * 50, 400, i as i32 * 50 + 40),
                )
            })
            .collect();
        let analysis = analyze(&elements, None, &opts());
        assert_eq!(analysis.texts.len(), 20);
    }

    #[test]
    fn test_scroll_direction_from_proportions() {
        let tall = UiElement::new(0, Bounds::new(0, 0, 400, 1200)).with_scrollable(true);
        let wide = UiElement::new(1, Bounds::new(0, 0, 1200, 400)).with_scrollable(true);
        assert_eq!(ScrollDirection::for_element(&tall), ScrollDirection::Vertical);
        assert_eq!(ScrollDirection::for_element(&wide), ScrollDirection::Horizontal);
    }

    #[test]
    fn test_summary_segments_in_order() {
        let elements = vec![
            UiElement::new(0, Bounds::new(0, 0, 1080, 150))
                .with_class_name("Toolbar")
                .with_text("Checkout"),
            button(1, "Pay now", Bounds::new(0, 300, 500, 380)),
            UiElement::new(2, Bounds::new(0, 400, 500, 480))
                .with_class_name("android.widget.EditText"),
            UiElement::new(3, Bounds::new(0, 500, 400, 1700)).with_scrollable(true),
        ];
        let analysis = analyze(&elements, Some("CheckoutActivity"), &opts());
        assert_eq!(
            analysis.summary,
            "Screen: CheckoutActivity; 1 button: Pay now; 1 input field; scrollable vertical"
        );
    }

    #[test]
    fn test_summary_prefers_activity_hint_over_title() {
        let elements = vec![
            UiElement::new(0, Bounds::new(0, 0, 1080, 150))
                .with_class_name("Toolbar")
                .with_text("Inbox"),
        ];
        let with_hint = analyze(&elements, Some("MailActivity"), &opts());
        assert!(with_hint.summary.starts_with("Screen: MailActivity"));
        let without = analyze(&elements, None, &opts());
        assert!(without.summary.starts_with("Screen: Inbox"));
    }
}
