//! Mock Blue Alliance API client for testing
//!
//! Provides a mock implementation of [`TbaApi`] for unit testing without
//! making real API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiResponse, TbaApi};
use crate::error::{ApiError, Result};

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub path: String,
    pub validator: Option<String>,
}

/// Scripted reply for one request
enum Reply {
    Fresh(Value, Option<String>),
    NotModified,
    Fail(fn() -> ApiError),
}

/// Mock API client for testing.
///
/// Queue replies per path with the builder methods; each request pops the
/// next reply for its path. A path with nothing queued answers 404.
///
/// # Example
/// ```ignore
/// let mock = MockTbaClient::new()
///     .with_fresh("/teams/0", json!([]), Some("v1"));
/// ```
#[derive(Default, Clone)]
pub struct MockTbaClient {
    replies: Arc<Mutex<HashMap<String, VecDeque<Reply>>>>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockTbaClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, path: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a 200 response with `body` and an optional validator
    pub fn with_fresh(self, path: &str, body: Value, validator: Option<&str>) -> Self {
        self.push(path, Reply::Fresh(body, validator.map(str::to_string)))
    }

    /// Queue a 304 response
    pub fn with_not_modified(self, path: &str) -> Self {
        self.push(path, Reply::NotModified)
    }

    /// Queue a failure
    pub fn with_error(self, path: &str, error: fn() -> ApiError) -> Self {
        self.push(path, Reply::Fail(error))
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    /// All requests received so far, in order
    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl TbaApi for MockTbaClient {
    fn url(&self, path: &str) -> String {
        format!("mock://api/v3{}", path)
    }

    async fn get(&self, path: &str, validator: Option<&str>) -> Result<ApiResponse> {
        self.captured.lock().unwrap().push(CapturedRequest {
            path: path.to_string(),
            validator: validator.map(str::to_string),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Fresh(body, validator)) => Ok(ApiResponse::Fresh { body, validator }),
            Some(Reply::NotModified) => Ok(ApiResponse::NotModified),
            Some(Reply::Fail(error)) => Err(error().into()),
            None => Err(ApiError::NotFound(path.to_string()).into()),
        }
    }
}
