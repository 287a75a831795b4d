use dioxus::prelude::*;

use crate::app::Route;

/// Replace the current history entry with `to` once mounted.
#[component]
pub fn Redirect(to: Route) -> Element {
    let nav = use_navigator();

    use_effect(move || {
        nav.replace(to.clone());
    });

    rsx! {
        main { class: "container", aria_busy: "true", "Redirecting..." }
    }
}
