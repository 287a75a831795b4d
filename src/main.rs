//! Voyage Admin
//!
//! Serves the admin console (server feature) or boots it in the browser (web feature).

use voyage_admin::app::App;

fn main() {
    #[cfg(feature = "server")]
    init_server();

    dioxus::launch(App);
}

#[cfg(feature = "server")]
fn init_server() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_admin=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Voyage Admin v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration once; the UI reuses the cached copy
    let config = voyage_admin::config::client_config();
    tracing::info!(?config, "Configuration loaded");
}
