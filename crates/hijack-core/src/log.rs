//! Hijack log events and sinks.
//!
//! Two kinds of event exist: the real resolver could not be located (error),
//! and a lookup was hijacked (info). The message text is fixed here so every
//! sink (syslog inside the layer, tracing in the CLI) writes the same line.

use hijack_config::{log_core_error, log_core_info};
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent<'a> {
    SymbolMissing {
        symbol: &'a str,
    },
    Hijacked {
        name: &'a str,
        from: IpAddr,
        /// Replacement as configured, not re-rendered
        to: &'a str,
    },
}

impl LogEvent<'_> {
    pub fn is_error(&self) -> bool {
        matches!(self, LogEvent::SymbolMissing { .. })
    }
}

impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::SymbolMissing { symbol } => write!(f, "failed to look up {}()", symbol),
            LogEvent::Hijacked { name, from, to } => {
                write!(f, "hijacking gethostbyname for {} from {} to {}", name, from, to)
            }
        }
    }
}

/// Destination for hijack log events.
pub trait HijackLog {
    fn record(&self, event: &LogEvent<'_>);
}

impl<T: HijackLog + ?Sized> HijackLog for &T {
    fn record(&self, event: &LogEvent<'_>) {
        (**self).record(event)
    }
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl HijackLog for TracingLog {
    fn record(&self, event: &LogEvent<'_>) {
        match event {
            LogEvent::SymbolMissing { symbol } => {
                log_core_error!("failed to locate real resolver", symbol = *symbol);
            }
            LogEvent::Hijacked { name, from, to } => {
                log_core_info!(
                    "hijacking gethostbyname",
                    host = *name,
                    from = tracing::field::display(from),
                    to = *to
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_hijack_message_text() {
        let event = LogEvent::Hijacked {
            name: "example.com",
            from: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
            to: "10.0.0.9",
        };
        assert_eq!(
            event.to_string(),
            "hijacking gethostbyname for example.com from 93.184.216.34 to 10.0.0.9"
        );
        assert!(!event.is_error());
    }

    #[test]
    fn test_symbol_missing_message_text() {
        let event = LogEvent::SymbolMissing {
            symbol: "gethostbyname",
        };
        assert_eq!(event.to_string(), "failed to look up gethostbyname()");
        assert!(event.is_error());
    }
}
