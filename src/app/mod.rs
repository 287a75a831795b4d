//! Dioxus fullstack application entry point.
//!
//! This module provides the root App component, the route table and the
//! [`AdminContext`] every page reads the session and the guard from.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus::router::Navigator;

pub mod api;
pub mod components;
pub mod pages;

use crate::auth::{AuthError, HttpAuthTransport, LoginService};
use crate::config::{self, AppConfig};
use crate::dashboard::ShellState;
use crate::http::HttpClient;
use crate::navigation::{AppPath, Command, RouteGuard};
use crate::session::SessionStore;

use components::theme::THEME_SCRIPT;
use components::DashboardShell;
use pages::{
    Analytics, Home, ManageAccommodations, ManageDestinations, ManageTours, NotFound, Overview,
    Profile, Restricted, SystemTests,
};

/// CSS for the landing page, sign-in card and dashboard shell.
const APP_STYLES: &str = r#"
:root { --pico-font-size: 15px; --sidebar-width: 16rem; --sidebar-collapsed: 4.25rem; }
.shell { display: grid; grid-template-columns: var(--sidebar-width) 1fr; min-height: 100vh; }
.shell.collapsed { grid-template-columns: var(--sidebar-collapsed) 1fr; }
.sidebar { border-right: 1px solid var(--pico-muted-border-color); padding: 1rem 0.75rem; }
.sidebar-brand { display: flex; align-items: center; justify-content: space-between; margin-bottom: 1rem; }
.nav-link { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 0.75rem; border-radius: 0.375rem; text-decoration: none; }
.nav-link.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
.nav-link svg { width: 1.25rem; height: 1.25rem; flex-shrink: 0; }
.main-panel { display: flex; flex-direction: column; min-width: 0; }
.topbar { display: flex; align-items: center; justify-content: space-between; gap: 1rem; padding: 0.75rem 1.5rem; border-bottom: 1px solid var(--pico-muted-border-color); }
.topbar h1 { margin: 0; font-size: 1.25rem; }
.topbar-actions { display: flex; align-items: center; gap: 0.75rem; }
.content { padding: 1.5rem; }
.menu-button { display: none; }
.scrim { position: fixed; inset: 0; background: rgba(0,0,0,.5); z-index: 40; }
.drawer { position: fixed; inset: 0 auto 0 0; width: 100%; max-width: 20rem; z-index: 50; background: var(--pico-background-color); padding: 1rem; }
.profile-menu { position: relative; }
.profile-dropdown { position: absolute; right: 0; top: 2.75rem; min-width: 14rem; z-index: 30; padding: 0.75rem; background: var(--pico-card-background-color); border: 1px solid var(--pico-muted-border-color); border-radius: 0.5rem; }
.profile-dropdown button { width: 100%; margin-top: 0.5rem; }
.hero { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; gap: 1rem; }
.login-card { max-width: 24rem; margin: 10vh auto; }
.login-error { color: var(--pico-del-color); }
.status-ok { color: var(--pico-ins-color); }
.status-err { color: var(--pico-del-color); }
.theme-switcher { display: flex; gap: 0.25rem; }
.theme-switcher button { padding: 0.25rem 0.5rem; font-size: 0.8rem; margin: 0; }
.theme-switcher button.active { background: var(--pico-primary-background); color: var(--pico-primary-inverse); }
@media (max-width: 768px) {
  .shell, .shell.collapsed { grid-template-columns: 1fr; }
  .shell > .sidebar { display: none; }
  .menu-button { display: inline-flex; }
}
"#;

/// Shared state for every page: configuration, session store, login
/// service, and the signals driving the guard and the shell.
#[derive(Clone)]
pub struct AdminContext {
    pub config: AppConfig,
    pub store: SessionStore,
    pub http: HttpClient,
    pub login: Rc<LoginService<HttpAuthTransport>>,
    pub guard: Signal<RouteGuard>,
    pub shell: Signal<ShellState>,
    /// Set once the guard has been seeded from storage on mount
    pub restored: Signal<bool>,
}

impl AdminContext {
    pub fn new(config: AppConfig) -> Self {
        let http = HttpClient::new(&config);
        let login = LoginService::new(HttpAuthTransport::new(http.clone()), config.login_timeout());
        Self {
            store: SessionStore::for_platform(),
            http,
            login: Rc::new(login),
            guard: Signal::new(RouteGuard::new()),
            shell: Signal::new(ShellState::default()),
            restored: Signal::new(false),
            config,
        }
    }

    /// Seed the guard from whatever session survived the reload.
    pub fn restore(&self) {
        let mut guard = self.guard;
        let mut restored = self.restored;
        guard.set(RouteGuard::restore(&self.store));
        restored.set(true);
    }

    /// Run a guard command and return where the UI should be.
    pub fn dispatch(&self, command: Command) -> AppPath {
        let mut guard = self.guard;
        let target = guard.write().dispatch(command, &self.store);
        target
    }

    /// Submit the sign-in form and move the guard on success.
    pub async fn submit_login(&self, identifier: &str, secret: &str) -> Result<AppPath, AuthError> {
        let outcome = self.login.submit(&self.store, identifier, secret).await;
        let mut guard = self.guard;
        let shown = guard.write().complete_login(outcome, &self.store);
        shown
    }

    /// Dispatch, close the drawer and menus, and move the router.
    pub fn go(&self, nav: Navigator, command: Command) {
        let target = self.dispatch(command);
        let mut shell = self.shell;
        shell.write().on_navigate();
        nav.push(Route::from(target));
    }

    pub fn sign_out(&self, nav: Navigator) {
        let target = self.dispatch(Command::SignOut);
        let mut shell = self.shell;
        shell.set(ShellState::default());
        tracing::info!("Admin signed out");
        nav.replace(Route::from(target));
    }
}

pub fn use_admin() -> AdminContext {
    use_context::<AdminContext>()
}

/// Root app component with routing
#[component]
pub fn App() -> Element {
    let ctx = use_context_provider(|| AdminContext::new(config::client_config()));

    // Storage is only reachable on the client, so seed the guard after mount
    use_effect(move || ctx.restore());

    rsx! {
        document::Title { "Voyage Admin" }
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css" }
        document::Style { {APP_STYLES} }
        // Theme init runs immediately (no DOM needed) to prevent flash
        document::Script { {THEME_SCRIPT} }

        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},
    #[layout(DashboardShell)]
        #[route("/dashboard")]
        Overview {},
        #[route("/dashboard/analytics")]
        Analytics {},
        #[route("/dashboard/tours")]
        ManageTours {},
        #[route("/dashboard/accommodations")]
        ManageAccommodations {},
        #[route("/dashboard/destinations")]
        ManageDestinations {},
        #[route("/dashboard/tests")]
        SystemTests {},
        #[route("/dashboard/restricted")]
        Restricted {},
        #[route("/profile")]
        Profile {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<AppPath> for Route {
    fn from(path: AppPath) -> Self {
        match path {
            AppPath::Home => Route::Home {},
            AppPath::Dashboard => Route::Overview {},
            AppPath::Analytics => Route::Analytics {},
            AppPath::Tours => Route::ManageTours {},
            AppPath::Accommodations => Route::ManageAccommodations {},
            AppPath::Destinations => Route::ManageDestinations {},
            AppPath::Tests => Route::SystemTests {},
            AppPath::Restricted => Route::Restricted {},
            AppPath::Profile => Route::Profile {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_match_app_paths() {
        for path in AppPath::ALL {
            assert_eq!(Route::from(path).to_string(), path.as_str());
        }
    }

    #[test]
    fn test_unknown_paths_hit_not_found() {
        let route: Route = "/somewhere/else".parse().unwrap();
        assert!(matches!(route, Route::NotFound { .. }));
    }
}
