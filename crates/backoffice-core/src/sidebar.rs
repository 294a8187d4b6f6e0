//! Responsive sidebar state.

use serde::Serialize;

/// Viewport width at which the layout switches to desktop.
pub const DESKTOP_BREAKPOINT: u32 = 1024;

/// Open/collapsed state of the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub open: bool,
    pub collapsed: bool,
    pub is_desktop: bool,
    #[serde(skip)]
    breakpoint: u32,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::with_breakpoint(DESKTOP_BREAKPOINT)
    }
}

impl SidebarState {
    pub fn with_breakpoint(breakpoint: u32) -> Self {
        Self {
            open: false,
            collapsed: false,
            is_desktop: false,
            breakpoint,
        }
    }

    /// Sets the initial state for the given viewport width.
    pub fn initialize(&mut self, width: u32) {
        self.is_desktop = width >= self.breakpoint;
        if self.is_desktop {
            self.open = true;
        }
        self.collapsed = false;
    }

    /// Handles a viewport resize. State only changes when the width crosses
    /// the breakpoint.
    pub fn on_resize(&mut self, width: u32) {
        let was_desktop = self.is_desktop;
        self.is_desktop = width >= self.breakpoint;

        if was_desktop != self.is_desktop {
            // Mobile closes the drawer but keeps it expanded for next open.
            self.open = self.is_desktop;
            self.collapsed = false;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        let was_open = self.open;
        self.open = !self.open;

        if !self.is_desktop && self.open && !was_open {
            self.collapsed = false;
        }
    }

    pub fn toggle_collapse(&mut self) {
        self.collapsed = !self.collapsed;
    }
}
