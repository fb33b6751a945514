//! The Blue Alliance API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod tba;

#[cfg(test)]
pub use mock::MockTbaClient;
pub use tba::TbaClient;

/// Header spellings the API has been seen using for the entity tag.
///
/// Checked in order; the first one present wins.
pub const VALIDATOR_HEADERS: [&str; 2] = ["ETag", "Etag"];

/// Find the validator token using the accepted header spellings.
pub fn validator_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    VALIDATOR_HEADERS.iter().find_map(|name| lookup(name))
}

/// Outcome of a single successful GET.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// 2xx with a decoded body and the validator the server sent, if any
    Fresh {
        body: Value,
        validator: Option<String>,
    },

    /// 304 - the copy identified by the validator is still current
    NotModified,
}

/// The Blue Alliance API transport
#[async_trait]
pub trait TbaApi: Send + Sync {
    /// Absolute URL for an API path, used for requests and log messages
    fn url(&self, path: &str) -> String;

    /// Issue one GET for `path`, conditional on `validator` when given.
    async fn get(&self, path: &str, validator: Option<&str>) -> Result<ApiResponse>;
}
