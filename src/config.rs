// src/config.rs
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "d_poll_ms")]          pub poll_ms: u64,
    #[serde(default = "d_fetch_timeout_ms")] pub fetch_timeout_ms: u64,
    #[serde(default = "d_user_agent")]       pub user_agent: String,
}
fn d_poll_ms() -> u64 { 30_000 }
fn d_fetch_timeout_ms() -> u64 { 10_000 }
fn d_user_agent() -> String { concat!("spreadwatch/", env!("CARGO_PKG_VERSION")).into() }
#[inline]
pub fn ms(d: u64) -> std::time::Duration { Duration::from_millis(d) }

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        // tokio's interval panics on a zero period
        ms(self.poll_ms.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        ms(self.fetch_timeout_ms.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_ms: d_poll_ms(),
            fetch_timeout_ms: d_fetch_timeout_ms(),
            user_agent: d_user_agent(),
        }
    }
}
