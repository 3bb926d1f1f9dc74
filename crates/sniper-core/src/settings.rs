use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SniperError};

// ── Defaults ───────────────────────────────────────────────────────────────────

/// Virginia Tech timetable endpoint for course searches.
pub const DEFAULT_TIMETABLE_URL: &str =
    "https://selfservice.banner.vt.edu/ssb/HZSKVTSC.P_ProcRequest";

/// Seconds between availability cycles when the config leaves it unset.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// Spring 2026.
pub const DEFAULT_TERM: &str = "202601";

/// Blacksburg.
pub const DEFAULT_CAMPUS: &str = "0";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sender address accepted by Resend without a verified domain.
pub const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Watch Virginia Tech course sections and get an email when a seat opens
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vt-sniper",
    about = "Watch Virginia Tech course sections and get an email when a seat opens",
    version
)]
pub struct Settings {
    /// Path to the JSON config file (defaults to ./config.json, then the user config dir)
    #[arg(long, env = "VT_SNIPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resend API key used for email notifications
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Sender address for notification emails
    #[arg(long, env = "VT_SNIPER_FROM", default_value = DEFAULT_FROM_ADDRESS)]
    pub from: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Run a scripted demo against fake data instead of the live timetable
    #[arg(long)]
    pub demo: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        // An exported-but-empty variable counts as unset.
        if settings
            .resend_api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            settings.resend_api_key = None;
        }
        settings
    }
}

// ── Config (file) ──────────────────────────────────────────────────────────────

/// Runtime configuration read from `config.json`.
///
/// Zero or empty values fall back to the defaults above, so a minimal file
/// only needs `crns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Course Reference Numbers to monitor, in priority order.
    #[serde(default)]
    pub crns: Vec<String>,
    /// Notification destination; no email is sent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Seconds between availability cycles.
    #[serde(default)]
    pub check_interval: u64,
    /// Term code, e.g. `202601`.
    #[serde(default)]
    pub term: String,
    /// Campus code, e.g. `0`.
    #[serde(default)]
    pub campus: String,
    /// Timetable endpoint override (test doubles, mirrors).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Read, default-fill and validate the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SniperError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse, default-fill and validate a config document.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.with_defaults().validated()
    }

    /// Replace unset fields with their defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.check_interval == 0 {
            self.check_interval = DEFAULT_CHECK_INTERVAL_SECS;
        }
        if self.term.trim().is_empty() {
            self.term = DEFAULT_TERM.to_string();
        }
        if self.campus.trim().is_empty() {
            self.campus = DEFAULT_CAMPUS.to_string();
        }
        if self.base_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            self.base_url = None;
        }
        if self.email.as_deref().is_some_and(|e| e.trim().is_empty()) {
            self.email = None;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        }
        self.crns = self
            .crns
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    fn validated(self) -> Result<Self> {
        if self.crns.is_empty() {
            return Err(SniperError::Config("no CRNs specified in config".to_string()));
        }
        Ok(self)
    }

    /// Effective timetable endpoint.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_TIMETABLE_URL)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── Config defaults ───────────────────────────────────────────────────────

    #[test]
    fn test_config_minimal_file_gets_defaults() {
        let cfg = Config::from_json(r#"{ "crns": ["13466"] }"#).expect("valid config");

        assert_eq!(cfg.crns, vec!["13466".to_string()]);
        assert_eq!(cfg.check_interval, DEFAULT_CHECK_INTERVAL_SECS);
        assert_eq!(cfg.term, DEFAULT_TERM);
        assert_eq!(cfg.campus, DEFAULT_CAMPUS);
        assert_eq!(cfg.base_url(), DEFAULT_TIMETABLE_URL);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert!(cfg.email.is_none());
    }

    #[test]
    fn test_config_explicit_values_kept() {
        let cfg = Config::from_json(
            r#"{
                "crns": ["13466", "13472"],
                "email": "student@vt.edu",
                "checkInterval": 45,
                "term": "202609",
                "campus": "10",
                "baseUrl": "http://127.0.0.1:9000/timetable",
                "requestTimeoutSecs": 5
            }"#,
        )
        .expect("valid config");

        assert_eq!(cfg.crns.len(), 2);
        assert_eq!(cfg.email.as_deref(), Some("student@vt.edu"));
        assert_eq!(cfg.check_interval(), Duration::from_secs(45));
        assert_eq!(cfg.term, "202609");
        assert_eq!(cfg.campus, "10");
        assert_eq!(cfg.base_url(), "http://127.0.0.1:9000/timetable");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_empty_strings_are_unset() {
        let cfg = Config::from_json(
            r#"{ "crns": [" 13466 ", ""], "email": "", "baseUrl": "", "term": "", "campus": "" }"#,
        )
        .expect("valid config");

        assert_eq!(cfg.crns, vec!["13466".to_string()]);
        assert!(cfg.email.is_none());
        assert!(cfg.base_url.is_none());
        assert_eq!(cfg.term, DEFAULT_TERM);
        assert_eq!(cfg.campus, DEFAULT_CAMPUS);
    }

    // ── Config validation ─────────────────────────────────────────────────────

    #[test]
    fn test_config_rejects_missing_crns() {
        let err = Config::from_json(r#"{ "email": "a@b.c" }"#).unwrap_err();
        assert!(matches!(err, SniperError::Config(_)));
        assert!(err.to_string().contains("no CRNs"));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = Config::from_json("{ crns: ").unwrap_err();
        assert!(matches!(err, SniperError::JsonParse(_)));
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "crns": ["13466"], "checkInterval": 10 }"#).expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.check_interval, 10);
    }

    #[test]
    fn test_config_load_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("absent.json");

        let err = Config::load_from(&path).unwrap_err();
        match err {
            SniperError::FileRead { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_settings_defaults() {
        let s = Settings::load_from_args(["vt-sniper"]).expect("parse");
        assert_eq!(s.log_level, "WARNING");
        assert!(!s.demo);
        assert!(!s.debug);
        assert!(s.log_file.is_none());
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let s = Settings::load_from_args(["vt-sniper", "--log-level", "ERROR", "--debug"])
            .expect("parse");
        assert_eq!(s.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_explicit_flags() {
        let s = Settings::load_from_args([
            "vt-sniper",
            "--config",
            "/tmp/sniper.json",
            "--resend-api-key",
            "re_123",
            "--from",
            "alerts@example.com",
            "--demo",
        ])
        .expect("parse");
        assert_eq!(s.config, Some(PathBuf::from("/tmp/sniper.json")));
        assert_eq!(s.resend_api_key.as_deref(), Some("re_123"));
        assert_eq!(s.from, "alerts@example.com");
        assert!(s.demo);
    }

    #[test]
    fn test_settings_blank_api_key_is_unset() {
        let s = Settings::load_from_args(["vt-sniper", "--resend-api-key", "  "]).expect("parse");
        assert!(s.resend_api_key.is_none());
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        assert!(Settings::load_from_args(["vt-sniper", "--log-level", "LOUD"]).is_err());
    }
}
