use chrono::Utc;

use crate::tabs::model::{MenuItem, Tab};

/// Default number of tabs kept open before the oldest is evicted.
pub const DEFAULT_MAX_TABS: usize = 10;

/// Manages the ordered set of open tabs and the active one.
///
/// Tabs are kept in opening order. When the set is full, opening a new tab
/// evicts the oldest. Every operation is total: unknown ids are ignored.
///
/// # Examples
///
/// ```
/// use backoffice_core::tabs::{MenuItem, TabManager};
///
/// let mut tabs = TabManager::new();
/// tabs.add_tab(&MenuItem::leaf("Users", "/users"));
/// assert_eq!(tabs.active_tab_id(), Some("/users"));
/// ```
#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
    max_tabs: usize,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::with_max_tabs(DEFAULT_MAX_TABS)
    }
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager holding at most `max_tabs` tabs (at least one).
    pub fn with_max_tabs(max_tabs: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            max_tabs: max_tabs.max(1),
        }
    }

    /// Opens a tab for a leaf menu item, or activates it if already open.
    ///
    /// Items with submenu entries are ignored.
    pub fn add_tab(&mut self, item: &MenuItem) {
        if !item.is_leaf() {
            return;
        }

        let tab_id = Self::generate_tab_id(item.route.as_deref());

        if self.tabs.iter().any(|tab| tab.id == tab_id) {
            self.set_active_tab(&tab_id);
            return;
        }

        if self.tabs.len() >= self.max_tabs {
            let evicted = self.tabs.remove(0);
            tracing::debug!("[TabManager] Evicted oldest tab {}", evicted.id);
        }

        self.tabs.push(Tab {
            id: tab_id.clone(),
            label: item.label.clone(),
            icon: item.icon.clone(),
            route: item.route.clone(),
            component: None,
        });
        self.set_active_tab(&tab_id);
    }

    /// Removes a tab. If it was active, the previous tab becomes active,
    /// or the first remaining one, or none.
    pub fn remove_tab(&mut self, tab_id: &str) {
        let Some(index) = self.tabs.iter().position(|tab| tab.id == tab_id) else {
            return;
        };

        self.tabs.remove(index);

        if self.active_tab_id.as_deref() == Some(tab_id) {
            self.active_tab_id = if self.tabs.is_empty() {
                None
            } else {
                let new_index = index.saturating_sub(1);
                Some(self.tabs[new_index].id.clone())
            };
        }
    }

    /// Same as [`TabManager::remove_tab`].
    pub fn close_tab(&mut self, tab_id: &str) {
        self.remove_tab(tab_id);
    }

    pub fn close_all_tabs(&mut self) {
        self.tabs.clear();
        self.active_tab_id = None;
    }

    /// Keeps only the given tab and activates it.
    pub fn close_other_tabs(&mut self, tab_id: &str) {
        if let Some(tab) = self.tabs.iter().find(|tab| tab.id == tab_id).cloned() {
            self.tabs = vec![tab];
            self.active_tab_id = Some(tab_id.to_string());
        }
    }

    /// Activates an open tab; unknown ids are ignored.
    pub fn set_active_tab(&mut self, tab_id: &str) {
        if self.tabs.iter().any(|tab| tab.id == tab_id) {
            self.active_tab_id = Some(tab_id.to_string());
        }
    }

    /// Binds the view that renders a tab.
    pub fn bind_component(&mut self, tab_id: &str, component: impl Into<String>) {
        if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.id == tab_id) {
            tab.component = Some(component.into());
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let active = self.active_tab_id.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == active)
    }

    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }

    pub fn max_tabs(&self) -> usize {
        self.max_tabs
    }

    fn generate_tab_id(route: Option<&str>) -> String {
        match route {
            Some(route) if !route.is_empty() => route.to_string(),
            _ => format!("tab-{}", Utc::now().timestamp_millis()),
        }
    }
}
