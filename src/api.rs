//! HTTP client for the shop admin REST API.
//!
//! A thin wrapper around reqwest that pins the base URL, applies the
//! configured timeout, and maps transport failures into `ApiError`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from a single API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("request to {path} timed out after {timeout_seconds}s")]
    Timeout { path: String, timeout_seconds: u64 },

    /// The server could not be reached at all.
    #[error("cannot connect to the API at {base_url}")]
    Connect { base_url: String },

    /// The server answered with a non-success status.
    #[error("API returned {status} for {path}")]
    Status {
        path: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport failure.
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout_seconds: u64,
}

impl ApiClient {
    /// Create a client for the given base URL with a request timeout.
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(path, e))?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// POST a JSON body to `path`, discarding the response body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(path, e))?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status(),
            });
        }

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_send_error(&self, path: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                path: path.to_string(),
                timeout_seconds: self.timeout_seconds,
            }
        } else if e.is_connect() {
            ApiError::Connect {
                base_url: self.base_url.clone(),
            }
        } else {
            ApiError::Transport {
                path: path.to_string(),
                source: e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/category"), "http://localhost:8000/category");
        assert_eq!(client.url("category"), "http://localhost:8000/category");
    }

    #[test]
    fn test_status_error_display_names_path() {
        let err = ApiError::Status {
            path: "/orders/orders/total".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.contains("/orders/orders/total"));
        assert!(msg.contains("500"));
    }
}
