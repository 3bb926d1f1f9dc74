use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use sniper_core::notifications::ResendNotifier;
use sniper_core::settings::Settings;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

/// File name looked for in the working directory and the config dir.
pub const CONFIG_FILE_NAME: &str = "config.json";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) to
/// an `EnvFilter` directive. Unknown names pass through lowercased.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Events go to `log_file` (appended, no colour) when given, otherwise to
/// stderr. Falls back to `warn` if the level is not a valid directive.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}

// ── Config discovery ──────────────────────────────────────────────────────────

/// Locate the config file.
///
/// An explicit path is returned as-is, existing or not, so that loading it
/// reports the real error. Otherwise `./config.json`, then
/// `<config dir>/vt-sniper/config.json`; `None` when neither exists.
pub fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_config_path_in(explicit, &cwd, dirs::config_dir().as_deref())
}

fn discover_config_path_in(
    explicit: Option<&Path>,
    cwd: &Path,
    config_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let mut candidates = vec![cwd.join(CONFIG_FILE_NAME)];
    if let Some(dir) = config_dir {
        candidates.push(dir.join("vt-sniper").join(CONFIG_FILE_NAME));
    }
    candidates.into_iter().find(|p| p.is_file())
}

// ── Notifier ──────────────────────────────────────────────────────────────────

/// Email notifier from the CLI/env credential, bounded by `timeout` per send.
/// A missing key still yields a notifier; every send then fails as
/// unconfigured.
pub fn build_notifier(settings: &Settings, timeout: Duration) -> ResendNotifier {
    let notifier = ResendNotifier::new(settings.resend_api_key.clone())
        .with_from(&settings.from)
        .with_timeout(timeout);
    if !notifier.is_configured() {
        tracing::warn!("RESEND_API_KEY not set; seat notifications will not be delivered");
    }
    notifier
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_directive_mapping() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("Trace"), "trace");
    }

    #[test]
    fn test_explicit_path_wins_even_if_missing() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "{}").expect("write");
        let explicit = tmp.path().join("elsewhere.json");

        let found = discover_config_path_in(Some(&explicit), tmp.path(), None);
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn test_working_directory_before_config_dir() {
        let cwd = TempDir::new().expect("tempdir");
        let conf = TempDir::new().expect("tempdir");
        let local = cwd.path().join(CONFIG_FILE_NAME);
        std::fs::write(&local, "{}").expect("write");
        let user_dir = conf.path().join("vt-sniper");
        std::fs::create_dir_all(&user_dir).expect("mkdir");
        std::fs::write(user_dir.join(CONFIG_FILE_NAME), "{}").expect("write");

        let found = discover_config_path_in(None, cwd.path(), Some(conf.path()));
        assert_eq!(found, Some(local));
    }

    #[test]
    fn test_falls_back_to_config_dir() {
        let cwd = TempDir::new().expect("tempdir");
        let conf = TempDir::new().expect("tempdir");
        let user_dir = conf.path().join("vt-sniper");
        std::fs::create_dir_all(&user_dir).expect("mkdir");
        let user_config = user_dir.join(CONFIG_FILE_NAME);
        std::fs::write(&user_config, "{}").expect("write");

        let found = discover_config_path_in(None, cwd.path(), Some(conf.path()));
        assert_eq!(found, Some(user_config));
    }

    #[test]
    fn test_nothing_found() {
        let cwd = TempDir::new().expect("tempdir");
        assert_eq!(discover_config_path_in(None, cwd.path(), None), None);
    }

    #[test]
    fn test_build_notifier_from_settings() {
        let settings = Settings::load_from_args(["vt-sniper", "--resend-api-key", "re_test"])
            .expect("parse");
        let notifier = build_notifier(&settings, Duration::from_secs(7));
        assert!(notifier.is_configured());
        assert_eq!(notifier.timeout(), Duration::from_secs(7));

        let settings =
            Settings::load_from_args(["vt-sniper", "--resend-api-key", "  "]).expect("parse");
        assert!(!build_notifier(&settings, Duration::from_secs(30)).is_configured());
    }
}
