//! Theme side effects on the document root.
//!
//! The rendering layer implements [`ThemeTarget`]; [`DocumentTheme`] is the
//! in-process implementation that records the resulting class list and CSS
//! custom properties so they can be inspected or exported as a stylesheet.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::settings::color::{contrast_color, darken, lighten};

/// Class toggled on the document root for dark mode.
pub const DARK_CLASS: &str = "dark";

/// The document root the theme is applied to.
pub trait ThemeTarget: Send + Sync {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    fn set_property(&self, name: &str, value: &str);
}

/// Toggles the dark class.
pub fn apply_dark_mode(target: &dyn ThemeTarget, enabled: bool) {
    if enabled {
        target.add_class(DARK_CLASS);
    } else {
        target.remove_class(DARK_CLASS);
    }
}

/// Sets the primary color and the variables derived from it.
pub fn apply_primary_color(target: &dyn ThemeTarget, color: &str) {
    for (name, value) in primary_palette(color) {
        target.set_property(name, &value);
    }
}

/// CSS variables derived from a primary color, in application order.
///
/// Hover is 10% darker, active 15% darker, the focus ring 20% lighter; text
/// colors are chosen for contrast.
pub fn primary_palette(color: &str) -> Vec<(&'static str, String)> {
    let hover = darken(color, 10.0);
    let active = darken(color, 15.0);
    let text = contrast_color(color).to_string();
    let hover_text = contrast_color(&hover).to_string();
    let focus = lighten(color, 20.0);

    vec![
        ("--p-primary-color", color.to_string()),
        ("--p-button-primary-background", color.to_string()),
        ("--p-button-primary-hover-background", hover.clone()),
        ("--p-button-primary-active-background", active.clone()),
        ("--p-button-primary-border-color", color.to_string()),
        ("--p-button-primary-hover-border-color", hover),
        ("--p-button-primary-active-border-color", active),
        ("--p-button-primary-color", text),
        ("--p-button-primary-hover-color", hover_text.clone()),
        ("--p-button-primary-active-color", hover_text),
        ("--p-focus-ring-color", focus),
    ]
}

#[derive(Debug, Default)]
struct DocumentState {
    classes: BTreeSet<String>,
    properties: BTreeMap<String, String>,
    /// Number of writes received, for observing side effects.
    writes: usize,
}

/// Recording document root.
#[derive(Debug, Default)]
pub struct DocumentTheme {
    state: Mutex<DocumentState>,
}

impl DocumentTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.lock().properties.get(name).cloned()
    }

    /// Total number of class/property writes applied so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Renders the recorded state as a stylesheet.
    pub fn to_css(&self) -> String {
        let state = self.lock();
        let selector = if state.classes.is_empty() {
            ":root".to_string()
        } else {
            let classes: Vec<_> = state.classes.iter().map(|c| format!(".{}", c)).collect();
            format!(":root{}", classes.concat())
        };

        let mut css = format!("{} {{\n", selector);
        for (name, value) in &state.properties {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push('}');
        css.push('\n');
        css
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ThemeTarget for DocumentTheme {
    fn add_class(&self, class: &str) {
        let mut state = self.lock();
        state.classes.insert(class.to_string());
        state.writes += 1;
    }

    fn remove_class(&self, class: &str) {
        let mut state = self.lock();
        state.classes.remove(class);
        state.writes += 1;
    }

    fn set_property(&self, name: &str, value: &str) {
        let mut state = self.lock();
        state.properties.insert(name.to_string(), value.to_string());
        state.writes += 1;
    }
}
