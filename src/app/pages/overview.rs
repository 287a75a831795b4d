//! Dashboard root (`/dashboard`).

use dioxus::prelude::*;

use crate::app::use_admin;
use crate::dashboard::NAV_ITEMS;
use crate::navigation::{AppPath, Command};

/// Overview page component.
#[component]
pub fn Overview() -> Element {
    let ctx = use_admin();
    let nav = use_navigator();
    let name = ctx
        .store
        .read()
        .map(|session| session.user.display_name())
        .unwrap_or_default();

    rsx! {
        section { id: "overview",
            div { class: "mb-4",
                h2 { "Welcome back, {name}" }
                p { "Jump to a section of the console." }
            }
            div { class: "grid",
                for item in NAV_ITEMS.into_iter().filter(|item| item.path != AppPath::Dashboard) {
                    article { key: "{item.label}",
                        header { strong { "{item.label}" } }
                        button {
                            class: "secondary outline",
                            r#type: "button",
                            onclick: {
                                let ctx = ctx.clone();
                                move |_| ctx.go(nav, Command::NavigateTo(item.path.as_str().to_string()))
                            },
                            "Open"
                        }
                    }
                }
            }
        }
    }
}
