use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        main { class: "container hero",
            h1 { "Page not found" }
            p { "Nothing lives at " code { "{path}" } "." }
            Link { to: Route::Home {}, "Back to Home" }
        }
    }
}
