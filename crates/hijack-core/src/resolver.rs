//! Resolver decorator.
//!
//! [`HijackingResolver`] wraps any [`Resolver`] and exposes the same
//! operation. Each call delegates first, then consults the current hijack
//! target and rewrites the first address of a matching result.

use crate::decision::{decide, Decision};
use crate::error::{HijackError, Result};
use crate::log::{HijackLog, LogEvent};
use crate::result::ResolutionResult;
use hijack_config::{log_core_debug, HijackConfig};

/// Resolve a hostname to its address records.
///
/// `Ok(None)` means the resolver itself reported failure.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>>;
}

impl<T: Resolver + ?Sized> Resolver for &T {
    fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>> {
        (**self).resolve(name)
    }
}

impl<T: Resolver + ?Sized> Resolver for Box<T> {
    fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>> {
        (**self).resolve(name)
    }
}

/// Where the hijack target comes from on each call.
pub trait ConfigSource {
    fn current(&self) -> HijackConfig;
}

/// Reads `HIJACK_HOST` / `HIJACK_ADDR` from the environment per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn current(&self) -> HijackConfig {
        HijackConfig::from_env()
    }
}

impl ConfigSource for HijackConfig {
    fn current(&self) -> HijackConfig {
        self.clone()
    }
}

/// A delegated result together with what the decorator did to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub result: ResolutionResult,
    pub decision: Decision,
}

pub struct HijackingResolver<R, C, L> {
    delegate: R,
    config: C,
    log: L,
}

impl<R, C, L> HijackingResolver<R, C, L>
where
    R: Resolver,
    C: ConfigSource,
    L: HijackLog,
{
    pub fn new(delegate: R, config: C, log: L) -> Self {
        Self {
            delegate,
            config,
            log,
        }
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }

    /// Same contract as the delegate: `Ok(None)` when it fails.
    pub fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>> {
        Ok(self.resolve_traced(name)?.map(|resolved| resolved.result))
    }

    pub fn resolve_traced(&self, name: &str) -> Result<Option<Resolved>> {
        let genuine = match self.delegate.resolve(name) {
            Ok(Some(result)) => result,
            Ok(None) => return Ok(None),
            Err(HijackError::SymbolNotFound { symbol }) => {
                self.log.record(&LogEvent::SymbolMissing { symbol });
                return Err(HijackError::SymbolNotFound { symbol });
            }
            Err(e) => return Err(e),
        };

        let config = self.config.current();
        let decision = decide(
            name.as_bytes(),
            genuine.family,
            genuine.first_address(),
            &config,
        );

        let result = match decision {
            Decision::Replace { from, to } => {
                self.log.record(&LogEvent::Hijacked {
                    name,
                    from,
                    to: config.addr.as_deref().unwrap_or_default(),
                });
                genuine.with_first_address(to)
            }
            Decision::Keep(reason) => {
                log_core_debug!(
                    "lookup passed through",
                    host = name,
                    reason = tracing::field::debug(reason)
                );
                genuine
            }
        };

        Ok(Some(Resolved { result, decision }))
    }
}

impl<R, C, L> Resolver for HijackingResolver<R, C, L>
where
    R: Resolver,
    C: ConfigSource,
    L: HijackLog,
{
    fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>> {
        HijackingResolver::resolve(self, name)
    }
}
