//! Route guard: which view is reachable given the current session.
//!
//! All navigation goes through [`RouteGuard::dispatch`]. Authentication is
//! never cached: every dispatch and every render check asks the
//! [`SessionStore`] again, so a session cleared elsewhere (another tab, a 401
//! on a collaborator call) demotes the guard on the next event.

use std::fmt;

use tracing::debug;

use crate::auth::AuthError;
use crate::session::{Session, SessionStore};

/// Every path the admin app answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPath {
    Home,
    Dashboard,
    Analytics,
    Tours,
    Accommodations,
    Destinations,
    Tests,
    Restricted,
    Profile,
}

impl AppPath {
    pub const ALL: [AppPath; 9] = [
        AppPath::Home,
        AppPath::Dashboard,
        AppPath::Analytics,
        AppPath::Tours,
        AppPath::Accommodations,
        AppPath::Destinations,
        AppPath::Tests,
        AppPath::Restricted,
        AppPath::Profile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppPath::Home => "/",
            AppPath::Dashboard => "/dashboard",
            AppPath::Analytics => "/dashboard/analytics",
            AppPath::Tours => "/dashboard/tours",
            AppPath::Accommodations => "/dashboard/accommodations",
            AppPath::Destinations => "/dashboard/destinations",
            AppPath::Tests => "/dashboard/tests",
            AppPath::Restricted => "/dashboard/restricted",
            AppPath::Profile => "/profile",
        }
    }

    /// Exact match only; `/dashboard/` is not `/dashboard`.
    pub fn parse(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == path)
    }

    /// Everything except the landing page needs a session.
    pub fn is_protected(self) -> bool {
        self != AppPath::Home
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Landing page, no session
    Public,
    /// Sign-in form showing, no session yet
    Authenticating,
    /// Session present, dashboard reachable
    Authenticated,
}

/// Inputs to the guard. Login itself is async and happens in
/// [`crate::auth::LoginService`]; the guard only hears the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RequestSignIn,
    /// "Back to Home" from the sign-in form
    CancelSignIn,
    LoginSucceeded,
    SignOut,
    NavigateTo(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    state: GuardState,
    current: AppPath,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    /// Fresh guard: `Public` on the landing page.
    pub fn new() -> Self {
        Self {
            state: GuardState::Public,
            current: AppPath::Home,
        }
    }

    /// Guard for app startup, seeded from whatever session survived the reload.
    pub fn restore(store: &SessionStore) -> Self {
        if store.is_authenticated() {
            debug!("Restored session, starting authenticated");
            Self {
                state: GuardState::Authenticated,
                current: AppPath::Dashboard,
            }
        } else {
            Self::new()
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn current(&self) -> AppPath {
        self.current
    }

    /// Apply one command and return the path the UI should show.
    pub fn dispatch(&mut self, command: Command, store: &SessionStore) -> AppPath {
        let authenticated = self.sync_with(store);
        let before = self.state;

        match command {
            Command::RequestSignIn => {
                if authenticated {
                    // Signed in elsewhere (another tab) while this guard was public
                    self.go(GuardState::Authenticated, AppPath::Dashboard);
                } else if self.state == GuardState::Public {
                    self.go(GuardState::Authenticating, AppPath::Home);
                }
            }
            Command::CancelSignIn => {
                if self.state == GuardState::Authenticating {
                    self.go(GuardState::Public, AppPath::Home);
                }
            }
            Command::LoginSucceeded => {
                if authenticated {
                    self.go(GuardState::Authenticated, AppPath::Dashboard);
                }
            }
            Command::SignOut => {
                store.clear();
                self.go(GuardState::Public, AppPath::Home);
            }
            Command::NavigateTo(path) => self.navigate(&path, authenticated),
        }

        if before != self.state {
            debug!("Route guard {:?} -> {:?} at {}", before, self.state, self.current);
        }
        self.current
    }

    /// Apply the outcome of a sign-in attempt.
    ///
    /// Success moves to the dashboard root. Any error leaves the guard where
    /// it was (the sign-in form) and is handed back for display.
    pub fn complete_login(
        &mut self,
        outcome: Result<Session, AuthError>,
        store: &SessionStore,
    ) -> Result<AppPath, AuthError> {
        match outcome {
            Ok(_) => Ok(self.dispatch(Command::LoginSucceeded, store)),
            Err(e) => {
                debug!("Sign-in failed, staying at {}: {}", self.current, e);
                Err(e)
            }
        }
    }

    /// Render-time check for `path`, re-reading the store.
    pub fn can_render(&self, path: &str, store: &SessionStore) -> bool {
        match AppPath::parse(path) {
            Some(p) if !p.is_protected() => true,
            _ => self.state == GuardState::Authenticated && store.is_authenticated(),
        }
    }

    fn navigate(&mut self, path: &str, authenticated: bool) {
        match (AppPath::parse(path), authenticated) {
            (None, true) | (Some(AppPath::Home), true) => {
                self.go(GuardState::Authenticated, AppPath::Dashboard)
            }
            (None, false) | (Some(AppPath::Home), false) => self.go(GuardState::Public, AppPath::Home),
            (Some(target), true) => self.go(GuardState::Authenticated, target),
            (Some(_), false) => {
                debug!("Blocked {} without a session, showing sign-in", path);
                self.go(GuardState::Authenticating, AppPath::Home);
            }
        }
    }

    /// Re-derive authentication; an authenticated guard whose session is gone
    /// falls back to `Public` on the landing page.
    fn sync_with(&mut self, store: &SessionStore) -> bool {
        let authenticated = store.is_authenticated();
        if !authenticated && self.state == GuardState::Authenticated {
            debug!("Session disappeared, leaving dashboard");
            self.go(GuardState::Public, AppPath::Home);
        }
        authenticated
    }

    fn go(&mut self, state: GuardState, path: AppPath) {
        self.state = state;
        self.current = path;
    }
}
