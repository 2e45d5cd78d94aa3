//! Logging setup.
//!
//! Logs go to stderr through a non-blocking writer so command output on
//! stdout stays clean. `RUST_LOG` wins over the level picked from flags.

use clap::ValueEnum;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Error => "error",
        }
    }

    /// Level implied by the global `--verbose` / `--quiet` flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => LogLevel::Debug,
            (false, true) => LogLevel::Error,
            (false, false) => LogLevel::Info,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output
    #[default]
    Compact,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub colors: bool,
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            colors: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directives: explicit filter, then `RUST_LOG`, then the level
    pub fn filter(&self) -> EnvFilter {
        if let Some(filter) = &self.env_filter
            && let Ok(filter) = EnvFilter::try_new(filter)
        {
            return filter;
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }

    /// Install the global subscriber. Keep the guard alive until exit so
    /// buffered lines are flushed.
    pub fn init(self) -> WorkerGuard {
        let (writer, guard) = tracing_appender::non_blocking(io::stderr());
        let filter = self.filter();

        match self.format {
            LogFormat::Json => {
                let layer = fmt::layer().json().with_writer(writer).with_target(true);
                let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(self.colors);
                let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(self.colors);
                let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
            }
        }

        guard
    }
}
