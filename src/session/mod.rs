//! Session store - token and admin profile persisted across reloads.
//!
//! The store is an injected context object; nothing here is global. Token and
//! user are written and read as a pair: a half-written session reads as absent.

pub mod storage;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use storage::{MemoryStorage, StorageBackend, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "adminToken";

/// Storage key for the serialized admin profile
pub const USER_KEY: &str = "adminUser";

/// Admin profile returned by the login endpoint.
///
/// `id` is whatever scalar the backend uses (numeric or string). Unknown
/// fields are kept so the stored record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AdminUser {
    pub fn new(id: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            role: None,
            name: None,
            email: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Identifier as display text (`"7"` for numeric ids, no quotes for strings)
    pub fn display_id(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Best label for the profile menu
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.display_id())
    }
}

/// Authenticated identity material held by the client.
#[derive(Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: AdminUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: AdminUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

// The token never goes to logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Read/write/clear access to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Store backed by a fresh in-process map
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// `localStorage` in the browser, in-process storage everywhere else
    /// (server render, native tests).
    pub fn for_platform() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if BrowserStorage::is_available() {
                return Self::new(BrowserStorage);
            }
            warn!("localStorage unavailable, session will not survive reloads");
        }
        Self::in_memory()
    }

    /// Underlying backend, shared with other persisted UI preferences
    pub fn backend(&self) -> Rc<dyn StorageBackend> {
        Rc::clone(&self.backend)
    }

    /// Persist both halves of the session.
    ///
    /// The user record goes first; if the token write then fails, the user
    /// record is removed again so the pair stays consistent.
    pub fn write(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        self.backend.set_item(USER_KEY, &user_json)?;
        if let Err(e) = self.backend.set_item(TOKEN_KEY, &session.token) {
            if let Err(rollback) = self.backend.remove_item(USER_KEY) {
                warn!("Failed to roll back {} after token write error: {}", USER_KEY, rollback);
            }
            return Err(e);
        }

        debug!(user = %session.user.display_id(), "Session written");
        Ok(())
    }

    /// Current session, or `None` if either key is missing or unreadable.
    pub fn read(&self) -> Option<Session> {
        let token = match self.backend.get_item(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                debug!("Session token unreadable: {}", e);
                return None;
            }
        };
        let raw_user = match self.backend.get_item(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("Session user unreadable: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<AdminUser>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                warn!("Stored {} is not a valid profile: {}", USER_KEY, e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Remove both keys. Failures are logged, never raised.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.backend.remove_item(key) {
                warn!("Failed to remove {} from storage: {}", key, e);
            }
        }
        debug!("Session cleared");
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
