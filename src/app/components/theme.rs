//! Theme switcher component for light/dark modes.

use dioxus::prelude::*;

use crate::app::use_admin;
use crate::dashboard::Theme;
use crate::session::StorageBackend;

/// Theme switcher with light and dark options.
/// Persists through the session store's backend and sets Pico's data-theme attribute.
#[component]
pub fn ThemeSwitcher() -> Element {
    let ctx = use_admin();
    let mut current_theme = use_signal(Theme::default);

    // Load theme from storage on mount
    let load_storage = ctx.store.backend();
    use_effect(move || {
        let theme = Theme::load(load_storage.as_ref());
        apply_theme(theme);
        current_theme.set(theme);
    });

    let light_storage = ctx.store.backend();
    let dark_storage = ctx.store.backend();
    let theme = current_theme();

    rsx! {
        div { class: "theme-switcher",
            button {
                id: "theme-light",
                r#type: "button",
                class: if theme == Theme::Light { "active" } else { "" },
                onclick: move |_| select_theme(Theme::Light, light_storage.as_ref(), current_theme),
                "Light"
            }
            button {
                id: "theme-dark",
                r#type: "button",
                class: if theme == Theme::Dark { "active" } else { "" },
                onclick: move |_| select_theme(Theme::Dark, dark_storage.as_ref(), current_theme),
                "Dark"
            }
        }
    }
}

fn select_theme(theme: Theme, storage: &dyn StorageBackend, mut current: Signal<Theme>) {
    current.set(theme);
    theme.save(storage);
    apply_theme(theme);
}

fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

/// Client-side JavaScript for initial theme setup (included in head).
/// Runs immediately to prevent flash of wrong theme.
pub const THEME_SCRIPT: &str = r#"
(function(){
    const t = localStorage.getItem('adminTheme') === 'light' ? 'light' : 'dark';
    document.documentElement.setAttribute('data-theme', t);
})();
"#;
