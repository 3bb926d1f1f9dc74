mod bootstrap;
mod demo;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use sniper_core::settings::{Config, Settings};
use sniper_data::client::TimetableClient;
use sniper_runtime::orchestrator::SeatMonitor;
use sniper_ui::app::{ConsoleApp, StartupInfo};

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

enum Outcome {
    AllFound,
    Interrupted,
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = Settings::load();

    if let Err(err) = bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    tracing::info!("VT Sniper v{} starting", env!("CARGO_PKG_VERSION"));

    match run(settings).await {
        Ok(Outcome::AllFound) => ExitCode::SUCCESS,
        Ok(Outcome::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "fatal");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<Outcome> {
    let (monitor, info) = if settings.demo {
        tracing::info!("running scripted demo");
        let (monitor, _recorder, info) = demo::build();
        (monitor, info)
    } else {
        live(&settings)?
    };

    let (rx, handle) = monitor.start();
    let app = ConsoleApp::default();

    tokio::select! {
        result = app.run(&info, rx) => {
            if let Err(err) = result {
                handle.abort();
                return Err(err).context("terminal output failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; stopping monitor");
            handle.abort();
            println!();
            return Ok(Outcome::Interrupted);
        }
    }

    let summary = handle
        .join()
        .await
        .context("monitor task stopped unexpectedly")??;
    tracing::info!(attempts = summary.attempts, "run complete");
    Ok(Outcome::AllFound)
}

/// Monitor wired to the live timetable and Resend.
fn live(settings: &Settings) -> Result<(SeatMonitor, StartupInfo)> {
    let path = bootstrap::discover_config_path(settings.config.as_deref()).context(
        "no config file found; pass --config or create ./config.json",
    )?;
    let config = Config::load_from(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        crns = config.crns.len(),
        term = %config.term,
        "config loaded"
    );

    let client =
        TimetableClient::from_config(&config).context("failed to build timetable client")?;
    let notifier = bootstrap::build_notifier(settings, config.request_timeout());

    let info = StartupInfo {
        crn_count: config.crns.len(),
        email: config.email.clone(),
        interval_secs: config.check_interval,
        term: config.term.clone(),
    };
    let monitor = SeatMonitor::new(
        Arc::new(client),
        Arc::new(notifier),
        config.crns.clone(),
        config.check_interval(),
    )
    .with_destination(config.email);

    Ok((monitor, info))
}
