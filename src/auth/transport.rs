//! Wire types and transport for `POST /api/auth/admin/login`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{HttpClient, HttpError};
use crate::session::AdminUser;

/// Login endpoint path
pub const LOGIN_PATH: &str = "/api/auth/admin/login";

/// Request body. `email` carries the sanitized identifier, whatever its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AdminUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn accepted(token: impl Into<String>, user: AdminUser) -> Self {
        Self {
            success: true,
            token: Some(token.into()),
            user: Some(user),
            message: None,
        }
    }

    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            token: None,
            user: None,
            message: message.map(str::to_string),
        }
    }
}

/// Anything that can carry a login request to the backend.
#[async_trait(?Send)]
pub trait AuthTransport {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError>;
}

/// Transport backed by the shared HTTP client.
#[derive(Clone, Debug)]
pub struct HttpAuthTransport {
    client: HttpClient,
}

impl HttpAuthTransport {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl AuthTransport for HttpAuthTransport {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError> {
        self.client.post_json(LOGIN_PATH, request).await
    }
}
