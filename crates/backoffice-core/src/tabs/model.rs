//! Tab and menu item models.

use serde::{Deserialize, Serialize};

/// An entry of the sidebar navigation menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Child entries; an item with children opens a submenu, not a tab
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    pub fn leaf(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: Some(route.into()),
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
        self
    }

    /// A leaf has no submenu items and is eligible to open a tab.
    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }
}

/// An open tab in the workspace area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Route path, or `tab-<unix millis>` when the item has no route
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub route: Option<String>,
    /// Key of the view bound to this tab, resolved from the route
    pub component: Option<String>,
}
