//! Hash routing between the views of the settings screen
//!
//! A route is a URL fragment such as `#settings-kb`. Each known route maps
//! to one view; some routes share a view. Routes living in the settings
//! submenu force the submenu open when they become active.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Route used when navigating to an empty fragment
pub const DEFAULT_ROUTE: &str = "#kb";

/// Page-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Knowledge base list
    Kb,
    /// Tag and document type settings
    SettingsKb,
    /// Graph settings, home of the device catalog editor
    SettingsGraph,
    /// Spare parts settings
    SettingsSpare,
}

impl View {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kb => "kb",
            Self::SettingsKb => "settings-kb",
            Self::SettingsGraph => "settings-graph",
            Self::SettingsSpare => "settings-spare",
        }
    }

    /// Whether the view's link sits inside the settings submenu
    #[must_use]
    pub const fn in_settings(&self) -> bool {
        !matches!(self, Self::Kb)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ROUTES: &[(&str, View)] = &[
    ("#kb", View::Kb),
    ("#settings-kb", View::SettingsKb),
    ("#settings-graph", View::SettingsGraph),
    ("#settings-spare", View::SettingsSpare),
    ("#logs", View::Kb),
    ("#graph", View::Kb),
];

/// Resolve a fragment to its view
#[must_use]
pub fn resolve(route: &str) -> Option<View> {
    ROUTES
        .iter()
        .find(|(hash, _)| *hash == route)
        .map(|(_, view)| *view)
}

/// Render-ready navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    /// Active fragment, which decides the highlighted link
    pub route: String,
    pub view: View,
    pub submenu_open: bool,
}

/// Active route plus the settings submenu state
#[derive(Debug, Clone)]
pub struct Router {
    route: String,
    view: View,
    submenu_open: bool,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
            view: View::Kb,
            submenu_open: false,
        }
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a route
    ///
    /// An empty fragment goes to [`DEFAULT_ROUTE`]; an unknown one is
    /// ignored. Returns whether the route was recognized.
    pub fn navigate(&mut self, route: &str) -> bool {
        let route = if route.is_empty() { DEFAULT_ROUTE } else { route };
        let Some(view) = resolve(route) else {
            debug!(route, "ignoring unknown route");
            return false;
        };

        self.route = route.to_string();
        self.view = view;
        if view.in_settings() {
            self.submenu_open = true;
        }
        debug!(route, view = %view, "navigated");
        true
    }

    /// Flip the settings submenu; returns the new state
    pub fn toggle_submenu(&mut self) -> bool {
        self.submenu_open = !self.submenu_open;
        self.submenu_open
    }

    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn submenu_open(&self) -> bool {
        self.submenu_open
    }

    #[must_use]
    pub fn snapshot(&self) -> NavView {
        NavView {
            route: self.route.clone(),
            view: self.view,
            submenu_open: self.submenu_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_route_goes_home() {
        let mut router = Router::new();
        router.navigate("#settings-kb");
        assert!(router.navigate(""));
        assert_eq!(router.route(), "#kb");
        assert_eq!(router.view(), View::Kb);
    }

    #[test]
    fn test_unknown_route_ignored() {
        let mut router = Router::new();
        router.navigate("#settings-graph");
        assert!(!router.navigate("#nowhere"));
        assert_eq!(router.view(), View::SettingsGraph);
        assert_eq!(router.route(), "#settings-graph");
    }

    #[test]
    fn test_aliases_share_kb_view() {
        let mut router = Router::new();
        assert!(router.navigate("#logs"));
        assert_eq!(router.view(), View::Kb);
        assert_eq!(router.route(), "#logs");
        assert_eq!(resolve("#graph"), Some(View::Kb));
    }

    #[test]
    fn test_settings_route_opens_submenu() {
        let mut router = Router::new();
        assert!(!router.submenu_open());
        router.navigate("#settings-spare");
        assert!(router.submenu_open());

        // Leaving the settings views keeps the submenu as it was
        router.navigate("#kb");
        assert!(router.submenu_open());
    }

    #[test]
    fn test_toggle_submenu() {
        let mut router = Router::new();
        assert!(router.toggle_submenu());
        assert!(!router.toggle_submenu());

        router.navigate("#settings-kb");
        assert!(!router.toggle_submenu());
        // Re-entering a settings route forces it open again
        router.navigate("#settings-graph");
        assert!(router.snapshot().submenu_open);
    }
}
