//! JSON-over-HTTP client shared by the login transport and the bearer
//! authenticated collaborator calls.
//!
//! Native builds (server, tests) go through `reqwest`; the browser build goes
//! through `fetch` via `web-sys`. Both are bounded by the configured timeout.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    /// 401/403 on a bearer-authenticated call
    #[error("not authorized")]
    Unauthorized,
}

/// `Authorization` header value for a bearer token
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Join a configured base URL and an absolute API path.
///
/// An empty base keeps the path relative (same origin as the page).
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Decode a body that should be JSON, falling back to the status code when
/// an error response carries no JSON.
fn decode_body<R: DeserializeOwned>(status: u16, body: &str) -> Result<R, HttpError> {
    match serde_json::from_str::<R>(body) {
        Ok(value) => Ok(value),
        Err(_) if !(200..300).contains(&status) => Err(HttpError::Status(status)),
        Err(e) => Err(HttpError::Decode(e.to_string())),
    }
}

/// Race `fut` against a timer.
pub async fn with_timeout<F: Future>(duration: Duration, fut: F) -> Result<F::Output, HttpError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::timeout(duration, fut)
            .await
            .map_err(|_| HttpError::Timeout)
    }

    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{select, Either};

        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        let timer = gloo_timers::future::TimeoutFuture::new(millis);
        futures::pin_mut!(fut);
        match select(fut, timer).await {
            Either::Left((output, _)) => Ok(output),
            Either::Right(_) => Err(HttpError::Timeout),
        }
    }
}

/// HTTP client bound to the configured API base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    timeout: Duration,
    #[cfg(not(target_arch = "wasm32"))]
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &AppConfig) -> Self {
        let timeout = config.request_timeout();

        #[cfg(not(target_arch = "wasm32"))]
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to build HTTP client with custom config: {}. Using default.",
                    e
                );
                reqwest::Client::default()
            });

        Self {
            base_url: config.api_base_url.clone(),
            timeout,
            #[cfg(not(target_arch = "wasm32"))]
            inner,
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one exchange within the request timeout. Natively the `reqwest`
    /// client already enforces it; `fetch` has no timeout of its own.
    async fn bounded<F>(&self, exchange: F) -> Result<(u16, String), HttpError>
    where
        F: Future<Output = Result<(u16, String), HttpError>>,
    {
        #[cfg(not(target_arch = "wasm32"))]
        {
            exchange.await
        }

        #[cfg(target_arch = "wasm32")]
        {
            with_timeout(self.timeout, exchange).await?
        }
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// The reply is decoded whatever the status code, so endpoints that answer
    /// `401 {"success": false, ...}` still produce a value.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, HttpError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let (status, text) = self.bounded(self.send_post(&url, body)).await?;
        decode_body(status, &text)
    }

    /// GET with an optional bearer token. 401/403 become `Unauthorized`.
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<R, HttpError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let (status, text) = self.bounded(self.send_get(&url, bearer)).await?;
        if status == 401 || status == 403 {
            return Err(HttpError::Unauthorized);
        }
        if !(200..300).contains(&status) {
            return Err(HttpError::Status(status));
        }
        decode_body(status, &text)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send_post<B: Serialize>(&self, url: &str, body: &B) -> Result<(u16, String), HttpError> {
        let response = self
            .inner
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| map_reqwest_error(&e))?;
        Ok((status, text))
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send_get(&self, url: &str, bearer: Option<&str>) -> Result<(u16, String), HttpError> {
        let mut request = self.inner.get(url);
        if let Some(token) = bearer {
            request = request.header("Authorization", bearer_header(token));
        }
        let response = request.send().await.map_err(|e| map_reqwest_error(&e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| map_reqwest_error(&e))?;
        Ok((status, text))
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_post<B: Serialize>(&self, url: &str, body: &B) -> Result<(u16, String), HttpError> {
        let json = serde_json::to_string(body).map_err(|e| HttpError::Decode(e.to_string()))?;
        wasm::fetch("POST", url, Some(&json), None).await
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_get(&self, url: &str, bearer: Option<&str>) -> Result<(u16, String), HttpError> {
        wasm::fetch("GET", url, None, bearer).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_reqwest_error(err: &reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Network(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{bearer_header, HttpError};

    fn network(err: JsValue) -> HttpError {
        HttpError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }

    pub(super) async fn fetch(
        method: &str,
        url: &str,
        body: Option<&str>,
        bearer: Option<&str>,
    ) -> Result<(u16, String), HttpError> {
        let init = web_sys::RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(body));
        }

        let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(network)?;
        let headers = request.headers();
        if body.is_some() {
            headers
                .set("Content-Type", "application/json")
                .map_err(network)?;
        }
        if let Some(token) = bearer {
            headers
                .set("Authorization", &bearer_header(token))
                .map_err(network)?;
        }

        let window = web_sys::window().ok_or_else(|| HttpError::Network("no window".into()))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();
        Ok((status, text))
    }
}
