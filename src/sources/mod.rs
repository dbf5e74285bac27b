// src/sources/mod.rs
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub mod extract;
pub mod http;
pub mod registry;

pub use http::HttpFetcher;

/// Pure, total mapping from a source's raw JSON to a price. Never panics;
/// any unexpected shape yields `None`.
pub type Extractor = fn(&Value) -> Option<f64>;

#[derive(Clone, Copy)]
pub struct SourceSpec {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub extract: Extractor,
}

impl fmt::Debug for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSpec")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("undecodable body: {0}")]
    Decode(String),
    #[error("no usable price in payload")]
    Absent,
}

impl SourceError {
    /// Short label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            SourceError::Transport(_) => "transport",
            SourceError::Status(_)    => "status",
            SourceError::Timeout(_)   => "timeout",
            SourceError::Decode(_)    => "decode",
            SourceError::Absent       => "absent",
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `endpoint` and return the parsed JSON body.
    async fn fetch_json(&self, endpoint: &str) -> Result<Value, SourceError>;
}
