//! Analytics page component.
//!
//! Lists the chart datasets the backend exposes. A 401/403 means the stored
//! token is no longer accepted, so the session is dropped.

use dioxus::prelude::*;

use crate::app::api;
use crate::app::use_admin;
use crate::http::HttpError;

/// Analytics page component.
#[component]
pub fn Analytics() -> Element {
    let ctx = use_admin();
    let nav = use_navigator();

    let fetch_ctx = ctx.clone();
    let mut charts = use_resource(move || {
        let http = fetch_ctx.http.clone();
        let session = fetch_ctx.store.read();
        async move {
            match session {
                Some(session) => api::fetch_charts(&http, &session).await,
                None => Err(HttpError::Unauthorized),
            }
        }
    });

    // Rejected token: sign out and return to the landing page
    let expire_ctx = ctx.clone();
    use_effect(move || {
        if let Some(Err(HttpError::Unauthorized)) = &*charts.read() {
            tracing::warn!("Analytics request unauthorized, ending session");
            expire_ctx.sign_out(nav);
        }
    });

    let content = match &*charts.read() {
        None => rsx! {
            article { aria_busy: "true", "Loading charts..." }
        },
        Some(Ok(payload)) => {
            let titles = api::chart_titles(payload);
            if titles.is_empty() {
                rsx! { article { "No charts available yet." } }
            } else {
                rsx! {
                    article {
                        ul {
                            for title in titles {
                                li { key: "{title}", "{title}" }
                            }
                        }
                    }
                }
            }
        }
        Some(Err(HttpError::Unauthorized)) => rsx! {
            article { "Session expired." }
        },
        Some(Err(e)) => {
            let message = e.to_string();
            rsx! {
                article {
                    p { class: "status-err", "Could not load charts: {message}" }
                    button {
                        class: "secondary outline",
                        r#type: "button",
                        onclick: move |_| charts.restart(),
                        "Retry"
                    }
                }
            }
        }
    };

    rsx! {
        section { id: "analytics",
            div { class: "mb-4",
                h2 { "Analytics" }
                p { "Booking and revenue datasets from the reporting service." }
            }
            {content}
        }
    }
}
