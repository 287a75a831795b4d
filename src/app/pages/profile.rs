//! Profile page: the admin record stored with the session.

use dioxus::prelude::*;

use crate::app::use_admin;

#[component]
pub fn Profile() -> Element {
    let ctx = use_admin();

    let Some(session) = ctx.store.read() else {
        return rsx! {};
    };
    let user = session.user;
    let id = user.display_id();
    let name = user.name.clone().unwrap_or_else(|| "-".to_string());
    let email = user.email.clone().unwrap_or_else(|| "-".to_string());
    let role = user.role.clone().unwrap_or_else(|| "-".to_string());
    let raw = serde_json::to_string_pretty(&user).unwrap_or_default();

    rsx! {
        section { id: "profile",
            h2 { "Profile" }
            article {
                table {
                    tbody {
                        tr { th { scope: "row", "ID" } td { "{id}" } }
                        tr { th { scope: "row", "Name" } td { "{name}" } }
                        tr { th { scope: "row", "Email" } td { "{email}" } }
                        tr { th { scope: "row", "Role" } td { "{role}" } }
                    }
                }
                details {
                    summary { "Stored record" }
                    pre { "{raw}" }
                }
            }
        }
    }
}
