//! Structured logging setup.
//!
//! JSON or pretty console output, `RUST_LOG`-style env filtering, optional
//! rotating file output. Callers embedding the engine in a larger service
//! will usually install their own subscriber instead; [`init_logging`] is
//! for standalone tools and test harnesses.

use crate::error::{Result, ThesaurusError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub output: LogOutput,
    /// Directory for log files when `output` is `File`.
    pub log_dir: PathBuf,
    /// Log file name prefix for rotation.
    pub log_file_prefix: String,
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            format: LogFormat::Pretty,
            output: LogOutput::Stderr,
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "skos-graph".to_string(),
            default_directive: "info".to_string(),
        }
    }
}

/// Install the global subscriber. Returns the appender guard for file
/// output; dropping it flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));

    let (writer, guard) = match config.output {
        LogOutput::Stdout => (BoxMakeWriter::new(io::stdout), None),
        LogOutput::Stderr => (BoxMakeWriter::new(io::stderr), None),
        LogOutput::File => {
            let appender =
                tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
    };

    let fmt_layer = fmt::layer().with_writer(writer).with_target(true);
    let init_result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .try_init(),
    };
    init_result
        .map_err(|e| ThesaurusError::Config(format!("failed to install subscriber: {e}")))?;
    Ok(guard)
}
