//! Shared UI components for the Dioxus fullstack web UI.

pub mod header;
pub mod layout;
pub mod nav;
pub mod redirect;
pub mod theme;

pub use header::Header;
pub use layout::DashboardShell;
pub use nav::Sidebar;
pub use redirect::Redirect;
pub use theme::ThemeSwitcher;
