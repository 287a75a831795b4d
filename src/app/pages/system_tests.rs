//! System Tests page: live view of the session and guard, for support staff.

use dioxus::prelude::*;

use crate::app::use_admin;
use crate::session::{TOKEN_KEY, USER_KEY};

#[component]
pub fn SystemTests() -> Element {
    let ctx = use_admin();
    let route = use_route::<crate::app::Route>();

    let session = ctx.store.read();
    let guard = ctx.guard.read().clone();
    let token_state = match &session {
        Some(s) => format!("present ({} chars)", s.token.len()),
        None => "missing".to_string(),
    };
    let user_id = session
        .as_ref()
        .map(|s| s.user.display_id())
        .unwrap_or_else(|| "-".to_string());
    let guard_state = format!("{:?}", guard.state());
    let timeout = ctx.config.login_timeout_secs;
    let request_timeout = ctx.config.request_timeout_secs;
    let api_base = if ctx.config.api_base_url.is_empty() {
        "(same origin)".to_string()
    } else {
        ctx.config.api_base_url.clone()
    };

    rsx! {
        section { id: "system-tests",
            h2 { "System Tests" }
            article {
                table {
                    tbody {
                        tr {
                            th { scope: "row", "{TOKEN_KEY}" }
                            td { class: if session.is_some() { "status-ok" } else { "status-err" }, "{token_state}" }
                        }
                        tr { th { scope: "row", "{USER_KEY}" } td { "{user_id}" } }
                        tr { th { scope: "row", "Guard state" } td { "{guard_state}" } }
                        tr { th { scope: "row", "Route" } td { "{route}" } }
                        tr { th { scope: "row", "API base" } td { "{api_base}" } }
                        tr { th { scope: "row", "Login timeout" } td { "{timeout}s" } }
                        tr { th { scope: "row", "Request timeout" } td { "{request_timeout}s" } }
                    }
                }
            }
        }
    }
}
