use dashboard_core::{ApiError, ApiResult, ErrorBody};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::ApiConfig;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: Unable to reach the server. Please check your connection.";

/// JSON-over-HTTP transport for the dashboard backend.
///
/// Every failure comes back as an [`ApiError`]: status 0 when no response
/// arrived, the HTTP status otherwise.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Transport {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) if e.is_timeout() => return Err(self.classify_send_error(e)),
                Err(e) => {
                    tracing::debug!("Failed to read error body from {}: {}", url, e);
                    String::new()
                }
            };
            let body = match serde_json::from_str::<Value>(&text) {
                Ok(json) => ErrorBody::Json(json),
                Err(_) => ErrorBody::Text(text),
            };
            let err = classify_status(status, body);
            tracing::debug!("POST {} failed: {}", url, err);
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify_send_error(e))?;
        serde_json::from_slice::<T>(&bytes)
            .map_err(|e| ApiError::new(status, format!("Invalid response: {}", e)))
    }

    fn classify_send_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::network(format!(
                "Request timed out after {}ms",
                self.timeout.as_millis()
            ))
        } else if err.is_connect() || err.is_request() {
            ApiError::network(NETWORK_ERROR_MESSAGE)
        } else {
            ApiError::network(err.to_string())
        }
    }
}

/// Build the error for a non-success response.
///
/// 422 bodies carry FastAPI-style `detail`; other statuses use a `message`
/// or `error` field when the body has one.
pub fn classify_status(status: u16, body: ErrorBody) -> ApiError {
    if status == 422 {
        tracing::warn!(body = ?body, "Backend rejected request payload (422)");
        let message = validation_message(&body);
        return ApiError::new(status, message).with_body(body);
    }

    let message = body
        .as_json()
        .and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .or_else(|| json.get("error").and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));
    ApiError::new(status, message).with_body(body)
}

fn validation_message(body: &ErrorBody) -> String {
    match body.as_json().and_then(|json| json.get("detail")) {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                "Validation error".to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => "Validation error".to_string(),
    }
}
