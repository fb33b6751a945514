//! The Blue Alliance API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, IF_NONE_MATCH};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::{ApiResponse, TbaApi, validator_from};
use crate::error::{ApiError, Result};

/// Default API host
pub const DEFAULT_API_HOST: &str = "https://www.thebluealliance.com";

/// Path prefix of the v3 read API
const API_PREFIX: &str = "/api/v3";

/// Header carrying the read API key
const AUTH_HEADER: &str = "X-TBA-Auth-Key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The Blue Alliance v3 API client
pub struct TbaClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl TbaClient {
    /// Create a new client. `api_host` overrides [`DEFAULT_API_HOST`].
    pub fn new(api_key: String, api_host: Option<&str>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let host = api_host.unwrap_or(DEFAULT_API_HOST).trim_end_matches('/');

        Ok(Self {
            http,
            base_url: format!("{}{}", host, API_PREFIX),
            api_key,
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TbaApi for TbaClient {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str, validator: Option<&str>) -> Result<ApiResponse> {
        let url = self.url(path);

        let mut request = self
            .http
            .get(&url)
            .header(AUTH_HEADER, &self.api_key)
            .header(ACCEPT, "application/json");
        if let Some(validator) = validator {
            request = request.header(IF_NONE_MATCH, validator);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::NOT_MODIFIED => Ok(ApiResponse::NotModified),
            status if status.is_success() => {
                let validator = validator_from(|name| {
                    response
                        .headers()
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                });
                let body = response.json::<Value>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(ApiResponse::Fresh { body, validator })
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}
