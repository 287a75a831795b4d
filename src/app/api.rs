//! Bearer-authenticated calls to backend collaborators.

use serde_json::Value;

use crate::http::{HttpClient, HttpError};
use crate::session::Session;

pub const ANALYTICS_CHARTS_PATH: &str = "/api/analytics/charts";

/// `GET /api/analytics/charts` with the session token.
pub async fn fetch_charts(http: &HttpClient, session: &Session) -> Result<Value, HttpError> {
    http.get_json(ANALYTICS_CHARTS_PATH, Some(&session.token)).await
}

/// Chart names from a charts payload.
///
/// Accepts an array of chart objects (using `title`, then `name`), an object
/// wrapping such an array under `charts`, or an object keyed by chart name.
pub fn chart_titles(payload: &Value) -> Vec<String> {
    fn from_items(items: &[Value]) -> Vec<String> {
        items
            .iter()
            .filter_map(|item| {
                item.get("title")
                    .or_else(|| item.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .collect()
    }

    match payload {
        Value::Array(items) => from_items(items),
        Value::Object(map) => match map.get("charts") {
            Some(Value::Array(items)) => from_items(items),
            _ => map.keys().cloned().collect(),
        },
        _ => Vec::new(),
    }
}
