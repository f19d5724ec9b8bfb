//! # hijack-core
//!
//! Hostname hijacking for controlled DNS testing.
//!
//! A genuine lookup is always performed first. If `HIJACK_HOST` matches the
//! queried name and `HIJACK_ADDR` parses in the result's address family, the
//! first address record is replaced; everything else passes through
//! untouched, failures included.
//!
//! - [`decide`] / [`hijack`]: the pure decision
//! - [`HijackingResolver`]: decorator over any [`Resolver`]
//! - [`sys`]: `hostent` view and the platform resolver (unix)

pub mod decision;
pub mod error;
pub mod family;
pub mod log;
pub mod matching;
pub mod resolver;
pub mod result;
#[cfg(unix)]
pub mod sys;

pub use decision::{decide, hijack, Decision, KeepReason};
pub use error::{HijackError, Result};
pub use family::{parse_inet_aton, AddressFamily};
pub use log::{HijackLog, LogEvent, TracingLog};
pub use matching::host_matches;
pub use resolver::{ConfigSource, EnvConfig, HijackingResolver, Resolved, Resolver};
pub use result::ResolutionResult;

pub use hijack_config::HijackConfig;
