//! Logging Infrastructure
//!
//! Structured logging via `tracing`:
//! - console output on stderr (stdout carries CLI results)
//! - optional daily rolling application log under `<log_dir>/app/`
//!   (`app.YYYY-MM-DD.log`), pruned by [`cleanup_old_logs`]
//! - JSON format for production, human-readable otherwise

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const APP_LOG_PREFIX: &str = "app";
const APP_LOG_SUFFIX: &str = "log";

/// Initialize console logging at `info`
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format (true for production)
/// * `log_dir` - Optional directory for daily rolling file logs
///
/// # Examples
/// ```no_run
/// # use billing_engine::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let app_log = match log_dir {
        Some(dir) => Some(app_log_appender(Path::new(dir))?),
        None => None,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        let app_layer = app_log.map(|appender| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(appender))
        });

        subscriber.with(console_layer).with(app_layer).try_init()?;
    } else {
        // Pretty format for development
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        let app_layer = app_log.map(|appender| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(appender))
        });

        subscriber.with(console_layer).with(app_layer).try_init()?;
    }

    Ok(())
}

/// Daily rolling appender writing `<log_dir>/app/app.YYYY-MM-DD.log`
pub fn app_log_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    let app_log_dir = app_log_dir(log_dir);
    fs::create_dir_all(&app_log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(APP_LOG_PREFIX)
        .filename_suffix(APP_LOG_SUFFIX)
        .build(app_log_dir)?;
    Ok(appender)
}

fn app_log_dir(log_dir: &Path) -> PathBuf {
    log_dir.join("app")
}

/// Date of a rolled application log file name, e.g. `app.2024-03-07.log`
fn rolled_log_date(name: &str) -> Option<NaiveDate> {
    let date = name
        .strip_prefix(APP_LOG_PREFIX)?
        .strip_prefix('.')?
        .strip_suffix(APP_LOG_SUFFIX)?
        .strip_suffix('.')?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Delete application log files older than `retention_days`
///
/// Returns the number of files removed. A missing log directory is not an
/// error.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: u64) -> anyhow::Result<usize> {
    let app_log_dir = app_log_dir(log_dir);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let today = Local::now().date_naive();
    let cutoff = today
        .checked_sub_days(Days::new(retention_days))
        .unwrap_or(NaiveDate::MIN);

    let mut removed = 0;
    for entry in fs::read_dir(&app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date) = rolled_log_date(name)
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}
