//! Remote lookup against the timetable endpoint.
//!
//! [`CourseLookup`] is the seam the resolver, the availability checker and the
//! monitor loop depend on; [`TimetableClient`] is the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sniper_core::error::{Result, SniperError};
use sniper_core::settings::Config;

use crate::query::QueryParams;
use crate::table::{parse_results_table, ResultsTable};

// ── CourseLookup ──────────────────────────────────────────────────────────────

/// One timetable search for one CRN.
#[async_trait]
pub trait CourseLookup: Send + Sync {
    /// Search for `crn`, optionally restricted to sections with open seats.
    ///
    /// Exactly one request per call; retrying is the caller's business.
    async fn lookup(&self, crn: &str, open_only: bool) -> Result<ResultsTable>;
}

// ── TimetableClient ───────────────────────────────────────────────────────────

/// HTTP client for the Banner timetable search.
///
/// Term and campus are fixed for the client's lifetime; each lookup supplies
/// the CRN and the open-only toggle.
pub struct TimetableClient {
    http: Client,
    base_url: String,
    term: String,
    campus: String,
}

impl TimetableClient {
    /// Build a client with a per-request `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        term: impl Into<String>,
        campus: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vt-sniper/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            term: term.into(),
            campus: campus.into(),
        })
    }

    /// Build a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.term.clone(),
            config.campus.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters for one lookup.
    pub fn query(&self, crn: &str, open_only: bool) -> QueryParams {
        QueryParams::new(crn, self.term.as_str(), self.campus.as_str(), open_only)
    }

    /// POST `query` and return the raw response body.
    async fn fetch_document(&self, query: &QueryParams) -> Result<String> {
        let response = self
            .http
            .post(&self.base_url)
            .form(&query.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SniperError::unexpected_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            ));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CourseLookup for TimetableClient {
    async fn lookup(&self, crn: &str, open_only: bool) -> Result<ResultsTable> {
        let query = self.query(crn, open_only);
        tracing::debug!(crn, open_only, url = %self.base_url, "timetable lookup");
        let document = self.fetch_document(&query).await?;
        parse_results_table(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TimetableClient {
        TimetableClient::new(
            "http://127.0.0.1:9/timetable",
            "202601",
            "0",
            Duration::from_secs(2),
        )
        .expect("client")
    }

    #[test]
    fn test_query_uses_client_term_and_campus() {
        let q = client().query("13466", true);
        assert_eq!(q, QueryParams::new("13466", "202601", "0", true));
    }

    #[test]
    fn test_from_config_uses_default_endpoint() {
        let config = Config::from_json(r#"{ "crns": ["13466"] }"#).expect("config");
        let client = TimetableClient::from_config(&config).expect("client");
        assert_eq!(
            client.base_url(),
            sniper_core::settings::DEFAULT_TIMETABLE_URL
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failure() {
        let err = client().lookup("13466", false).await.unwrap_err();
        match err {
            SniperError::RequestFailed { status, .. } => assert_eq!(status, None),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }
}
