//! Live timing source backed by the public OpenF1 API.
//!
//! One reqwest client, four GET queries, no retries: the aggregation layer
//! already degrades per call, so a failed query simply costs one session's
//! data rather than the season.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, trace};

use crate::provider::TimingSource;
use crate::schema::{PositionRecord, RosterEntry, SessionMeta};
use crate::{Result, StandingsError};

/// Public API root used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openf1.org/v1";

/// Configuration for the OpenF1-backed source.
#[derive(Debug, Clone)]
pub struct OpenF1Config {
    /// API root, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout. Position feeds for a full race run to several
    /// megabytes, so this is generous by default.
    pub timeout: Duration,
}

impl Default for OpenF1Config {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: Duration::from_secs(30) }
    }
}

impl OpenF1Config {
    /// Set the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Timing source that queries the OpenF1 REST API.
pub struct OpenF1Source {
    client: Client,
    config: OpenF1Config,
}

impl OpenF1Source {
    /// Create a source with the given configuration.
    pub fn new(config: OpenF1Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Create a source against the public API with default settings.
    pub fn public_api() -> Result<Self> {
        Self::new(OpenF1Config::default())
    }

    /// Issue one GET and return the response body, mapping transport errors
    /// and non-success statuses into [`StandingsError`].
    async fn get_text(&self, path_and_query: &str) -> Result<String> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path_and_query);
        trace!(%url, "requesting upstream");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StandingsError::upstream_status(path_and_query.to_string(), status));
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "upstream response received");
        Ok(body)
    }
}

#[async_trait::async_trait]
impl TimingSource for OpenF1Source {
    async fn sessions_for_year(&self, year: i32) -> Result<Vec<SessionMeta>> {
        let body = self.get_text(&format!("sessions?year={year}")).await?;
        SessionMeta::parse_list(&body)
    }

    async fn positions(&self, session_key: i64) -> Result<Vec<PositionRecord>> {
        let body = self.get_text(&format!("position?session_key={session_key}")).await?;
        PositionRecord::parse_list(&body)
    }

    async fn roster(&self, session_key: i64) -> Result<Vec<RosterEntry>> {
        let body = self.get_text(&format!("drivers?session_key={session_key}")).await?;
        RosterEntry::parse_list(&body)
    }

    async fn driver_by_number(&self, driver_number: u32) -> Result<Vec<RosterEntry>> {
        let body = self.get_text(&format!("drivers?driver_number={driver_number}")).await?;
        RosterEntry::parse_list(&body)
    }
}
