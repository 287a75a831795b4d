//! Sidebar navigation built from the fixed menu in [`crate::dashboard`].

use dioxus::prelude::*;

use crate::app::use_admin;
use crate::dashboard::{is_active, Icon, NavItem, NAV_ITEMS};
use crate::navigation::Command;

#[derive(Props, Clone, PartialEq)]
pub struct SidebarProps {
    /// Current router path, compared exactly against item paths
    pub current: String,
    /// Narrow mode: icons only
    #[props(default = false)]
    pub collapsed: bool,
    /// Rendered inside the mobile drawer (no collapse toggle)
    #[props(default = false)]
    pub in_drawer: bool,
}

/// Sidebar with brand, collapse toggle and one link per menu item.
#[component]
pub fn Sidebar(props: SidebarProps) -> Element {
    let ctx = use_admin();
    let mut shell = ctx.shell;

    rsx! {
        nav { class: "sidebar", aria_label: "Dashboard",
            div { class: "sidebar-brand",
                if !props.collapsed {
                    strong { "Voyage Admin" }
                }
                if !props.in_drawer {
                    button {
                        class: "secondary outline",
                        r#type: "button",
                        aria_label: if props.collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                        onclick: move |_| shell.write().toggle_collapsed(),
                        if props.collapsed { "»" } else { "«" }
                    }
                }
            }
            ul {
                for item in NAV_ITEMS {
                    li { key: "{item.label}",
                        NavLink {
                            item,
                            active: is_active(&item, &props.current),
                            collapsed: props.collapsed,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLink(item: NavItem, active: bool, collapsed: bool) -> Element {
    let ctx = use_admin();
    let nav = use_navigator();
    let path = item.path.as_str();

    rsx! {
        a {
            class: if active { "nav-link active" } else { "nav-link" },
            href: path,
            title: item.label,
            aria_current: if active { "page" } else { "false" },
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                ctx.go(nav, Command::NavigateTo(path.to_string()));
            },
            Glyph { icon: item.icon }
            if !collapsed {
                span { "{item.label}" }
            }
        }
    }
}

#[component]
fn Glyph(icon: Icon) -> Element {
    rsx! {
        svg { fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
            path { "stroke-linecap": "round", "stroke-linejoin": "round", d: icon.svg_path() }
        }
    }
}
