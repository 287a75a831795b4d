//! Authenticated dashboard shell wrapping every `/dashboard` and `/profile` page.

use dioxus::prelude::*;

use super::header::Header;
use super::nav::Sidebar;
use crate::app::{use_admin, Route};
use crate::dashboard::header_title;
use crate::navigation::Command;

/// Layout route for protected pages.
///
/// Renders nothing protected until the guard has been restored from storage
/// and confirms, for this render, that a session exists.
#[component]
pub fn DashboardShell() -> Element {
    let ctx = use_admin();
    let route = use_route::<Route>();
    let path = route.to_string();

    if !(ctx.restored)() {
        return rsx! {
            main { class: "container", aria_busy: "true", "Checking session..." }
        };
    }

    if !ctx.guard.read().can_render(&path, &ctx.store) {
        return rsx! {
            GuardRedirect { requested: path }
        };
    }

    let mut shell = ctx.shell;
    let state = shell();
    let title = header_title(&path);

    rsx! {
        document::Title { "{title} - Voyage Admin" }

        div { class: if state.is_collapsed { "shell collapsed" } else { "shell" },
            Sidebar { current: path.clone(), collapsed: state.is_collapsed }

            if state.mobile_open {
                div {
                    class: "scrim",
                    onclick: move |_| shell.write().close_mobile(),
                }
                aside { class: "drawer", id: "mobile-drawer",
                    button {
                        class: "secondary outline",
                        r#type: "button",
                        aria_label: "Close menu",
                        onclick: move |_| shell.write().close_mobile(),
                        "×"
                    }
                    Sidebar { current: path.clone(), collapsed: false, in_drawer: true }
                }
            }

            div { class: "main-panel",
                Header { title: title.to_string() }
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

/// Sends a blocked navigation through the guard once, then follows its answer.
#[component]
fn GuardRedirect(requested: String) -> Element {
    let ctx = use_admin();
    let nav = use_navigator();

    use_effect(move || {
        let target = ctx.dispatch(Command::NavigateTo(requested.clone()));
        nav.replace(Route::from(target));
    });

    rsx! {
        main { class: "container", aria_busy: "true", "Redirecting..." }
    }
}
