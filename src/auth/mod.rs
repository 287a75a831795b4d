//! Credential submission: sanitize, validate, call the login endpoint, and
//! persist the session on success.
//!
//! Every failure comes back as an [`AuthError`] whose `Display` text is the
//! message shown inline under the form. Nothing here panics or retries.

pub mod transport;

use std::cell::Cell;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::http;
use crate::session::{Session, SessionStore};

pub use transport::{AuthTransport, HttpAuthTransport, LoginRequest, LoginResponse, LOGIN_PATH};

/// Shown when the server rejects the login without a message
pub const REJECTED_FALLBACK: &str = "Login failed. Please check credentials.";

/// Tag-like substrings, including an unterminated trailing `<...`
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("tag pattern is valid"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter both username and password.")]
    MissingCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("Unable to connect to the server. Please try again.")]
    Connectivity,
    #[error("Sign-in already in progress.")]
    SubmissionInFlight,
    #[error("Unable to save your session in this browser.")]
    SessionUnavailable,
}

/// Strip tag-like substrings and surrounding whitespace from the identifier.
pub fn sanitize_identifier(raw: &str) -> String {
    TAG_PATTERN.replace_all(raw, "").trim().to_string()
}

/// Validated form input, ready to send.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Sanitize the identifier and require both fields. The secret is kept
    /// byte-for-byte; only an entirely empty secret is refused.
    pub fn new(identifier: &str, secret: &str) -> Result<Self, AuthError> {
        let identifier = sanitize_identifier(identifier);
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(Self {
            identifier,
            secret: secret.to_string(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.identifier.clone(),
            password: self.secret.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Turn a decoded login response into a session or a user-facing error.
pub fn interpret_response(response: LoginResponse) -> Result<Session, AuthError> {
    if !response.success {
        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
        return Err(AuthError::Rejected(message));
    }

    match (response.token, response.user) {
        (Some(token), Some(user)) if !token.is_empty() => Ok(Session::new(token, user)),
        _ => {
            warn!("Login reported success without token and user, treating as malformed");
            Err(AuthError::Connectivity)
        }
    }
}

/// Clears the in-flight flag when an attempt ends, however it ends.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Submits credentials through a transport, one attempt at a time.
pub struct LoginService<T: AuthTransport> {
    transport: T,
    timeout: Duration,
    in_flight: Cell<bool>,
}

impl<T: AuthTransport> LoginService<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            in_flight: Cell::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one sign-in attempt.
    ///
    /// Invalid input fails before any request. On success the session is
    /// already in `store` when this returns; on any failure `store` is
    /// untouched.
    pub async fn submit(
        &self,
        store: &SessionStore,
        identifier: &str,
        secret: &str,
    ) -> Result<Session, AuthError> {
        let credentials = Credentials::new(identifier, secret)?;

        if self.in_flight.replace(true) {
            return Err(AuthError::SubmissionInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let request = credentials.to_request();
        let response = match http::with_timeout(self.timeout, self.transport.login(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(identifier = %credentials.identifier(), "Login request failed: {}", e);
                return Err(AuthError::Connectivity);
            }
            Err(_) => {
                warn!(identifier = %credentials.identifier(), "Login request timed out after {:?}", self.timeout);
                return Err(AuthError::Connectivity);
            }
        };

        let session = match interpret_response(response) {
            Ok(session) => session,
            Err(e) => {
                if let AuthError::Rejected(message) = &e {
                    info!(identifier = %credentials.identifier(), "Login rejected: {}", message);
                }
                return Err(e);
            }
        };

        store.write(&session).map_err(|e| {
            warn!("Failed to persist session: {}", e);
            AuthError::SessionUnavailable
        })?;

        info!(user = %session.user.display_id(), "Admin signed in");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;
    use crate::session::{AdminUser, StorageBackend, StorageError};
    use async_trait::async_trait;
    use std::cell::RefCell;

    /// Transport that records requests and replays a canned outcome
    struct ScriptedTransport {
        outcome: Result<LoginResponse, HttpError>,
        requests: RefCell<Vec<LoginRequest>>,
        hang: bool,
    }

    impl ScriptedTransport {
        fn replying(outcome: Result<LoginResponse, HttpError>) -> Self {
            Self {
                outcome,
                requests: RefCell::new(Vec::new()),
                hang: false,
            }
        }

        fn hanging() -> Self {
            Self {
                hang: true,
                ..Self::replying(Err(HttpError::Timeout))
            }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl AuthTransport for ScriptedTransport {
        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError> {
            self.requests.borrow_mut().push(request.clone());
            if self.hang {
                futures::future::pending::<()>().await;
            }
            tokio::task::yield_now().await;
            self.outcome.clone()
        }
    }

    fn service(outcome: Result<LoginResponse, HttpError>) -> LoginService<ScriptedTransport> {
        LoginService::new(ScriptedTransport::replying(outcome), Duration::from_secs(5))
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier(" admin@site.com "), "admin@site.com");
        assert_eq!(sanitize_identifier("<b>admin</b>"), "admin");
        assert_eq!(sanitize_identifier("admin<script>alert(1)</script>"), "adminalert(1)");
        assert_eq!(sanitize_identifier("admin <img src=x"), "admin");
        assert_eq!(sanitize_identifier("  <br/>  "), "");
    }

    #[test]
    fn test_credentials_keep_secret_verbatim() {
        let credentials = Credentials::new(" ops ", "  spaced secret ").unwrap();
        let request = credentials.to_request();
        assert_eq!(request.email, "ops");
        assert_eq!(request.password, "  spaced secret ");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::new("ops", "hunter2").unwrap();
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }

    #[test]
    fn test_interpret_response_rejection_fallback() {
        assert_eq!(
            interpret_response(LoginResponse::rejected(None)),
            Err(AuthError::Rejected(REJECTED_FALLBACK.to_string()))
        );
        assert_eq!(
            interpret_response(LoginResponse::rejected(Some(""))),
            Err(AuthError::Rejected(REJECTED_FALLBACK.to_string()))
        );
    }

    #[test]
    fn test_interpret_response_keeps_server_message_verbatim() {
        assert_eq!(
            interpret_response(LoginResponse::rejected(Some("  "))),
            Err(AuthError::Rejected("  ".to_string()))
        );
        assert_eq!(
            interpret_response(LoginResponse::rejected(Some(" Account locked "))),
            Err(AuthError::Rejected(" Account locked ".to_string()))
        );
    }

    #[test]
    fn test_interpret_response_success_without_token_is_malformed() {
        let response = LoginResponse {
            success: true,
            token: None,
            user: Some(AdminUser::new(1)),
            message: None,
        };
        assert_eq!(interpret_response(response), Err(AuthError::Connectivity));

        let empty_token = LoginResponse::accepted("", AdminUser::new(1));
        assert_eq!(interpret_response(empty_token), Err(AuthError::Connectivity));
    }

    #[test]
    fn test_in_flight_flag_resets_after_rejection() {
        let svc = service(Ok(LoginResponse::rejected(Some("Nope"))));
        let store = SessionStore::in_memory();

        let first = tokio_test::block_on(svc.submit(&store, "ops", "pw"));
        assert_eq!(first, Err(AuthError::Rejected("Nope".to_string())));
        assert!(!svc.is_submitting());

        let second = tokio_test::block_on(svc.submit(&store, "ops", "pw"));
        assert_eq!(second, Err(AuthError::Rejected("Nope".to_string())));
        assert_eq!(svc.transport().calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_credentials_make_no_request() {
        let svc = service(Ok(LoginResponse::accepted("T", AdminUser::new("U"))));
        let store = SessionStore::in_memory();

        for (identifier, secret) in [("", "pw"), ("   ", "pw"), ("<b></b>", "pw"), ("admin", "")] {
            let result = svc.submit(&store, identifier, secret).await;
            assert_eq!(result, Err(AuthError::MissingCredentials), "{:?}", (identifier, secret));
        }

        assert_eq!(svc.transport().calls(), 0);
        assert!(store.read().is_none());
    }

    #[tokio::test]
    async fn test_successful_login_writes_session() {
        let svc = service(Ok(LoginResponse::accepted("T", AdminUser::new("U"))));
        let store = SessionStore::in_memory();

        let session = svc.submit(&store, "admin", "pw").await.unwrap();

        assert_eq!(session, Session::new("T", AdminUser::new("U")));
        assert_eq!(store.read(), Some(Session::new("T", AdminUser::new("U"))));
        assert!(!svc.is_submitting());
    }

    #[tokio::test]
    async fn test_happy_path_sends_sanitized_identifier() {
        let svc = service(Ok(LoginResponse::accepted("abc", AdminUser::new(1))));
        let store = SessionStore::in_memory();

        svc.submit(&store, " admin@site.com ", "p@ss").await.unwrap();

        let requests = svc.transport().requests.borrow();
        assert_eq!(
            requests.as_slice(),
            &[LoginRequest {
                email: "admin@site.com".to_string(),
                password: "p@ss".to_string(),
            }]
        );
        assert_eq!(store.read(), Some(Session::new("abc", AdminUser::new(1))));
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_store_untouched() {
        let svc = service(Ok(LoginResponse::rejected(Some("Invalid password"))));
        let store = SessionStore::in_memory();
        let previous = Session::new("old", AdminUser::new(9));
        store.write(&previous).unwrap();

        let result = svc.submit(&store, "admin", "wrong").await;

        assert_eq!(result, Err(AuthError::Rejected("Invalid password".to_string())));
        assert_eq!(result.unwrap_err().to_string(), "Invalid password");
        assert_eq!(store.read(), Some(previous));
    }

    #[tokio::test]
    async fn test_transport_failure_is_connectivity_error() {
        for failure in [
            HttpError::Network("connection refused".to_string()),
            HttpError::Decode("expected value".to_string()),
            HttpError::Status(502),
        ] {
            let svc = service(Err(failure));
            let store = SessionStore::in_memory();

            let result = svc.submit(&store, "admin", "pw").await;

            assert_eq!(result, Err(AuthError::Connectivity));
            assert_eq!(svc.transport().calls(), 1, "no retry");
            assert!(store.read().is_none());
        }
    }

    #[tokio::test]
    async fn test_hung_request_times_out() {
        let svc = LoginService::new(ScriptedTransport::hanging(), Duration::from_millis(20));
        let store = SessionStore::in_memory();

        let result = svc.submit(&store, "admin", "pw").await;

        assert_eq!(result, Err(AuthError::Connectivity));
        assert!(!svc.is_submitting(), "flag resets after timeout");
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_refused() {
        let svc = service(Ok(LoginResponse::accepted("T", AdminUser::new("U"))));
        let store = SessionStore::in_memory();

        let (first, second) = futures::join!(
            svc.submit(&store, "admin", "pw"),
            svc.submit(&store, "admin", "pw")
        );

        assert!(first.is_ok());
        assert_eq!(second, Err(AuthError::SubmissionInFlight));
        assert_eq!(svc.transport().calls(), 1);

        // Resubmitting afterwards is allowed again
        assert!(svc.submit(&store, "admin", "pw").await.is_ok());
        assert_eq!(svc.transport().calls(), 2);
    }

    struct ReadOnlyStorage;

    impl StorageBackend for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_session_unavailable() {
        let svc = service(Ok(LoginResponse::accepted("T", AdminUser::new("U"))));
        let store = SessionStore::new(ReadOnlyStorage);

        let result = svc.submit(&store, "admin", "pw").await;

        assert_eq!(result, Err(AuthError::SessionUnavailable));
    }
}
