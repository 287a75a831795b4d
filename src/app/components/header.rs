//! Dashboard top bar: drawer button, page title, theme control and profile menu.

use dioxus::prelude::*;

use super::theme::ThemeSwitcher;
use crate::app::use_admin;
use crate::navigation::{AppPath, Command};

#[component]
pub fn Header(title: String) -> Element {
    let ctx = use_admin();
    let mut shell = ctx.shell;

    rsx! {
        header { class: "topbar",
            div { class: "topbar-actions",
                button {
                    class: "menu-button secondary outline",
                    r#type: "button",
                    aria_label: "Open menu",
                    aria_controls: "mobile-drawer",
                    onclick: move |_| shell.write().open_mobile(),
                    svg { width: "20", height: "20", fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
                        path { "stroke-linecap": "round", "stroke-linejoin": "round", d: "M4 6h16M4 12h16M4 18h16" }
                    }
                }
                h1 { "{title}" }
            }
            div { class: "topbar-actions",
                ThemeSwitcher {}
                ProfileMenu {}
            }
        }
    }
}

/// Avatar button with a dropdown for the profile page and sign-out.
#[component]
fn ProfileMenu() -> Element {
    let ctx = use_admin();
    let nav = use_navigator();
    let mut shell = ctx.shell;
    let open = shell().profile_open;

    // The shell only renders with a session, but the store is the source of truth
    let Some(session) = ctx.store.read() else {
        return rsx! {};
    };
    let name = session.user.display_name();
    let role = session.user.role.clone();
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    let profile_ctx = ctx.clone();
    let sign_out_ctx = ctx.clone();

    rsx! {
        div { class: "profile-menu",
            button {
                class: "secondary",
                r#type: "button",
                aria_haspopup: "true",
                aria_expanded: if open { "true" } else { "false" },
                onclick: move |_| shell.write().toggle_profile(),
                "{initial}"
            }
            if open {
                div { class: "profile-dropdown", role: "menu",
                    p {
                        strong { "{name}" }
                        if let Some(role) = &role {
                            br {}
                            small { "{role}" }
                        }
                    }
                    button {
                        class: "secondary outline",
                        r#type: "button",
                        onclick: move |_| profile_ctx.go(nav, Command::NavigateTo(AppPath::Profile.as_str().to_string())),
                        "Profile"
                    }
                    button {
                        class: "contrast",
                        r#type: "button",
                        onclick: move |_| sign_out_ctx.sign_out(nav),
                        "Sign out"
                    }
                }
            }
        }
    }
}
