// src/sources/http.rs
use std::time::Duration;

use serde_json::Value;

use super::{Fetcher, SourceError};
use crate::config::MonitorConfig;

/// reqwest-backed transport. Safe to share across concurrent fetches.
pub struct HttpFetcher {
    pub http: reqwest::Client,
    pub timeout: Duration,
}

impl HttpFetcher {
    pub fn from_config(cfg: &MonitorConfig) -> Result<Self, reqwest::Error> {
        let timeout = cfg.fetch_timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(cfg.user_agent.clone())
            .build()?;
        Ok(Self { http, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, endpoint: &str) -> Result<Value, SourceError> {
        let resp = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        resp.json::<Value>().await.map_err(|e| self.classify(e))
    }
}
