//! Seat-open notifications.
//!
//! [`Notifier`] is the capability the monitor loop calls when a course opens.
//! [`ResendNotifier`] delivers through the Resend transactional email API;
//! [`RecordingNotifier`] keeps every message in memory for tests and the demo.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{Result, SniperError};
use crate::settings::{DEFAULT_FROM_ADDRESS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Resend's send-email endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

// ── Notifier ──────────────────────────────────────────────────────────────────

/// Something that can deliver a one-shot message to a destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `body` to `destination` with the given `subject`.
    ///
    /// Errors are per-message; a failed send never poisons the notifier.
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<()>;
}

// ── ResendNotifier ────────────────────────────────────────────────────────────

/// Email delivery through the Resend HTTP API.
///
/// The API key is injected at construction. A missing key is reported as
/// [`SniperError::Unconfigured`] on each send rather than at startup, so the
/// monitor keeps running without email.
pub struct ResendNotifier {
    client: Client,
    api_key: Option<String>,
    from: String,
    endpoint: String,
    /// Upper bound on one send, connect through response body.
    timeout: Duration,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

impl ResendNotifier {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from: DEFAULT_FROM_ADDRESS.to_string(),
            endpoint: RESEND_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the sender address.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Override the API endpoint (local test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<()> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SniperError::Unconfigured("RESEND_API_KEY not set".to_string()))?;

        let payload = SendEmailRequest {
            from: &self.from,
            to: [destination],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SniperError::DeliveryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SniperError::DeliveryFailed(format!(
                "provider returned {}: {}",
                status,
                detail.trim()
            )));
        }

        tracing::debug!(to = destination, "notification email accepted by provider");
        Ok(())
    }
}

// ── RecordingNotifier ─────────────────────────────────────────────────────────

/// One message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub subject: String,
    pub body: String,
}

/// In-memory notifier that records every call.
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to the code under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    unconfigured: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that records each attempt but fails it with
    /// [`SniperError::Unconfigured`], like a Resend notifier without a key.
    pub fn unconfigured() -> Self {
        Self {
            sent: Arc::default(),
            unconfigured: true,
        }
    }

    /// Snapshot of every message passed to [`Notifier::send`] so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> Result<()> {
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(SentMessage {
                destination: destination.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
        if self.unconfigured {
            return Err(SniperError::Unconfigured("RESEND_API_KEY not set".to_string()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resend_timeout_defaults_to_request_timeout() {
        let notifier = ResendNotifier::new(None);
        assert_eq!(
            notifier.timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        let notifier = notifier.with_timeout(Duration::from_secs(5));
        assert_eq!(notifier.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_resend_without_key_is_unconfigured() {
        let notifier = ResendNotifier::new(None);
        assert!(!notifier.is_configured());

        let err = notifier
            .send("student@vt.edu", "subject", "body")
            .await
            .unwrap_err();
        assert!(matches!(err, SniperError::Unconfigured(_)));
    }

    #[tokio::test]
    async fn test_resend_unreachable_endpoint_is_delivery_failure() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let notifier = ResendNotifier::new(Some("re_test".to_string()))
            .with_endpoint("http://127.0.0.1:9/emails");

        let err = notifier
            .send("student@vt.edu", "subject", "body")
            .await
            .unwrap_err();
        assert!(matches!(err, SniperError::DeliveryFailed(_)), "got {err:?}");
    }

    #[test]
    fn test_send_email_request_shape() {
        let req = SendEmailRequest {
            from: DEFAULT_FROM_ADDRESS,
            to: ["student@vt.edu"],
            subject: "VT Course Section Open!",
            text: "OPEN SEAT: Computer Systems (CRN: 13472)",
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["from"], "onboarding@resend.dev");
        assert_eq!(value["to"][0], "student@vt.edu");
        assert_eq!(value["subject"], "VT Course Section Open!");
        assert_eq!(value["text"], "OPEN SEAT: Computer Systems (CRN: 13472)");
    }

    #[tokio::test]
    async fn test_recording_notifier_records_calls() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.send("a@vt.edu", "s1", "b1").await.unwrap();
        notifier.send("b@vt.edu", "s2", "b2").await.unwrap();

        let sent = handle.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].destination, "a@vt.edu");
        assert_eq!(sent[1].subject, "s2");
        assert_eq!(sent[1].body, "b2");
    }

    #[tokio::test]
    async fn test_recording_notifier_unconfigured_still_records() {
        let notifier = RecordingNotifier::unconfigured();

        let err = notifier.send("a@vt.edu", "s", "b").await.unwrap_err();
        assert!(matches!(err, SniperError::Unconfigured(_)));
        assert_eq!(notifier.sent().len(), 1);
    }
}
