//! Admin sign-in form.

use dioxus::prelude::*;

use crate::app::{use_admin, Route};
use crate::navigation::Command;

/// Sign-in form shown on `/` while the guard is `Authenticating`.
#[component]
pub fn Login() -> Element {
    let ctx = use_admin();
    let nav = use_navigator();

    let mut identifier = use_signal(String::new);
    let mut secret = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut pending = use_signal(|| false);

    let submit_ctx = ctx.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if pending() {
            return;
        }
        pending.set(true);
        error.set(None);

        let ctx = submit_ctx.clone();
        let id_value = identifier();
        let secret_value = secret();
        spawn(async move {
            match ctx.submit_login(&id_value, &secret_value).await {
                Ok(target) => {
                    nav.replace(Route::from(target));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            pending.set(false);
        });
    };

    let back_ctx = ctx.clone();

    rsx! {
        main { class: "container",
            article { class: "login-card",
                header {
                    h2 { "Admin Sign In" }
                    small { "Voyage operations console" }
                }
                form { onsubmit: on_submit,
                    label { r#for: "admin-identifier", "Username" }
                    input {
                        id: "admin-identifier",
                        name: "username",
                        autocomplete: "username",
                        value: "{identifier}",
                        oninput: move |evt| identifier.set(evt.value()),
                    }
                    label { r#for: "admin-secret", "Password" }
                    input {
                        id: "admin-secret",
                        name: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{secret}",
                        oninput: move |evt| secret.set(evt.value()),
                    }
                    if let Some(message) = error() {
                        p { class: "login-error", role: "alert", "{message}" }
                    }
                    button {
                        r#type: "submit",
                        disabled: pending(),
                        aria_busy: if pending() { "true" } else { "false" },
                        if pending() { "Signing in..." } else { "Sign In" }
                    }
                }
                footer {
                    button {
                        class: "secondary outline",
                        r#type: "button",
                        onclick: move |_| {
                            back_ctx.dispatch(Command::CancelSignIn);
                        },
                        "Back to Home"
                    }
                }
            }
        }
    }
}
