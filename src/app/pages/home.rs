//! Landing page at `/`.
//!
//! What renders here follows the guard: the public hero, the sign-in form,
//! or a hop to the dashboard when a session already exists.

use dioxus::prelude::*;

use super::login::Login;
use crate::app::components::Redirect;
use crate::app::{use_admin, Route};
use crate::navigation::{Command, GuardState};

#[component]
pub fn Home() -> Element {
    let ctx = use_admin();
    let state = ctx.guard.read().state();

    match state {
        GuardState::Public => rsx! { Landing {} },
        GuardState::Authenticating => rsx! { Login {} },
        GuardState::Authenticated => rsx! { Redirect { to: Route::Overview {} } },
    }
}

#[component]
fn Landing() -> Element {
    let ctx = use_admin();

    rsx! {
        main { class: "container hero",
            h1 { "Voyage Travel" }
            p { "Tours, stays and destinations, managed in one place." }
            button {
                r#type: "button",
                onclick: move |_| {
                    ctx.dispatch(Command::RequestSignIn);
                },
                "Admin Sign In"
            }
        }
    }
}
