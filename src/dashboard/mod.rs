//! Dashboard shell model: sidebar menu, active-item lookup, layout toggles
//! and the persisted theme preference.
//!
//! Rendering lives in `app::components`; this module is plain data so the
//! highlighting and drawer rules can be tested without a DOM.

use tracing::warn;

use crate::navigation::AppPath;
use crate::session::StorageBackend;

/// Header title when the current path is not a sidebar item
pub const FALLBACK_TITLE: &str = "Dashboard";

/// Storage key for the theme preference
pub const THEME_KEY: &str = "adminTheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Overview,
    Analytics,
    Tours,
    Accommodations,
    Destinations,
    Tests,
    Restricted,
}

impl Icon {
    /// SVG path data (24x24 viewbox, stroked)
    pub fn svg_path(self) -> &'static str {
        match self {
            Icon::Overview => "M3 12l9-9 9 9M5 10v10h5v-6h4v6h5V10",
            Icon::Analytics => "M4 20V10M10 20V4M16 20v-8M22 20H2",
            Icon::Tours => "M3 7h18M3 12h18M3 17h12",
            Icon::Accommodations => "M3 21V8l9-5 9 5v13M9 21v-6h6v6",
            Icon::Destinations => "M12 21s-7-6.2-7-11a7 7 0 0114 0c0 4.8-7 11-7 11zM12 12a2 2 0 100-4 2 2 0 000 4z",
            Icon::Tests => "M9 3h6M10 3v6l-5 9a2 2 0 002 3h10a2 2 0 002-3l-5-9V3",
            Icon::Restricted => "M6 11V7a6 6 0 0112 0v4M5 11h14v10H5z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: AppPath,
    pub icon: Icon,
}

/// Sidebar entries in display order.
pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem {
        label: "Overview",
        path: AppPath::Dashboard,
        icon: Icon::Overview,
    },
    NavItem {
        label: "Analytics",
        path: AppPath::Analytics,
        icon: Icon::Analytics,
    },
    NavItem {
        label: "Manage Tours",
        path: AppPath::Tours,
        icon: Icon::Tours,
    },
    NavItem {
        label: "Manage Accommodations",
        path: AppPath::Accommodations,
        icon: Icon::Accommodations,
    },
    NavItem {
        label: "Manage Destinations",
        path: AppPath::Destinations,
        icon: Icon::Destinations,
    },
    NavItem {
        label: "System Tests",
        path: AppPath::Tests,
        icon: Icon::Tests,
    },
    NavItem {
        label: "Restricted",
        path: AppPath::Restricted,
        icon: Icon::Restricted,
    },
];

/// Sidebar item whose path equals `current` exactly.
pub fn active_item(current: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.path.as_str() == current)
}

pub fn is_active(item: &NavItem, current: &str) -> bool {
    item.path.as_str() == current
}

/// Header title for `current`: the active item's label, else "Dashboard".
pub fn header_title(current: &str) -> &'static str {
    active_item(current).map_or(FALLBACK_TITLE, |item| item.label)
}

/// Presentational toggles of the shell. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellState {
    pub is_collapsed: bool,
    pub mobile_open: bool,
    pub profile_open: bool,
}

impl ShellState {
    pub fn toggle_collapsed(&mut self) {
        self.is_collapsed = !self.is_collapsed;
    }

    pub fn open_mobile(&mut self) {
        self.mobile_open = true;
    }

    /// Close button or scrim click
    pub fn close_mobile(&mut self) {
        self.mobile_open = false;
    }

    pub fn toggle_profile(&mut self) {
        self.profile_open = !self.profile_open;
    }

    /// Any item navigation closes both the drawer and the profile menu.
    pub fn on_navigate(&mut self) {
        self.mobile_open = false;
        self.profile_open = false;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference, or the default when missing or unrecognized
    pub fn load(storage: &dyn StorageBackend) -> Self {
        storage
            .get_item(THEME_KEY)
            .ok()
            .flatten()
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    pub fn save(self, storage: &dyn StorageBackend) {
        if let Err(e) = storage.set_item(THEME_KEY, self.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
    }
}
