use dioxus::prelude::*;

use crate::app::use_admin;

/// Restricted area placeholder; the role shown is whatever the backend issued.
#[component]
pub fn Restricted() -> Element {
    let ctx = use_admin();
    let role = ctx
        .store
        .read()
        .and_then(|session| session.user.role)
        .unwrap_or_else(|| "unassigned".to_string());

    rsx! {
        section { id: "restricted",
            h2 { "Restricted" }
            article {
                p { "Account-level controls are handled by the operations team." }
                small { "Signed in with role: {role}" }
            }
        }
    }
}
