//! Structured logging utilities for dns-hijack components.
//!
//! Provides consistent logging with component prefixes and structured fields.
//!
//! # Usage
//!
//! ```ignore
//! use hijack_config::logging::*;
//!
//! log_core_info!("Hijacked lookup", host = "example.com");
//! log_cli_debug!("Spawning child", program = "curl");
//! ```
//!
//! The preloaded layer never installs a subscriber inside its host process;
//! it writes to the system log instead.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Component identifiers for log filtering
pub struct Component;

impl Component {
    pub const CORE: &'static str = "CORE";
    pub const CLI: &'static str = "CLI";
}

/// Log levels for runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

// === CORE logging macros ===

#[macro_export]
macro_rules! log_core_error {
    ($msg:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::error!(component = $crate::logging::Component::CORE, $($key = $value,)* $msg)
    };
}

#[macro_export]
macro_rules! log_core_info {
    ($msg:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(component = $crate::logging::Component::CORE, $($key = $value,)* $msg)
    };
}

#[macro_export]
macro_rules! log_core_debug {
    ($msg:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::debug!(component = $crate::logging::Component::CORE, $($key = $value,)* $msg)
    };
}

// === CLI logging macros ===

#[macro_export]
macro_rules! log_cli_info {
    ($msg:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(component = $crate::logging::Component::CLI, $($key = $value,)* $msg)
    };
}

#[macro_export]
macro_rules! log_cli_debug {
    ($msg:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::debug!(component = $crate::logging::Component::CLI, $($key = $value,)* $msg)
    };
}

/// Initialize logging with the given level filter.
/// Call this once at application startup.
pub fn init_logging(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
