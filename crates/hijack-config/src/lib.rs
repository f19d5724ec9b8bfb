//! # hijack-config
//!
//! Configuration management for dns-hijack.
//!
//! Two layers live here:
//!
//! - [`HijackConfig`]: the two environment values the interposer reads on
//!   every intercepted call (`HIJACK_HOST`, `HIJACK_ADDR`).
//! - [`Config`]: the launcher configuration, loaded from
//!   1. `~/.dns-hijack/config.toml` (global)
//!   2. `.dns-hijack/config.toml` (project-local, overrides global)
//!   3. Environment variables (highest priority)

pub mod logging;
pub mod testing;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use logging::LogLevel;

/// Target hostname to hijack.
pub const HIJACK_HOST_ENV: &str = "HIJACK_HOST";
/// Replacement address substituted for the target's first record.
pub const HIJACK_ADDR_ENV: &str = "HIJACK_ADDR";
/// Explicit path to the preloadable layer library.
pub const LIBRARY_ENV: &str = "DNS_HIJACK_LIBRARY";
/// Default log level for the launcher.
pub const LOG_ENV: &str = "DNS_HIJACK_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Hijack target as seen by the interposer for one call.
///
/// Neither value is validated here. A missing value disables hijacking, and
/// the address is only parsed once the family of the genuine result is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HijackConfig {
    pub host: Option<String>,
    pub addr: Option<String>,
}

impl HijackConfig {
    pub fn new(host: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            addr: Some(addr.into()),
        }
    }

    /// Read both values from the process environment, fresh on every call.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup(HIJACK_HOST_ENV),
            addr: lookup(HIJACK_ADDR_ENV),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.host.is_some() && self.addr.is_some()
    }

    /// Environment a child process needs to run with the layer preloaded.
    ///
    /// An existing `LD_PRELOAD` is kept after the layer so the layer's
    /// `gethostbyname` is bound first.
    pub fn preload_env(&self, library: &Path) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(host) = &self.host {
            vars.push((HIJACK_HOST_ENV.to_string(), host.clone()));
        }
        if let Some(addr) = &self.addr {
            vars.push((HIJACK_ADDR_ENV.to_string(), addr.clone()));
        }

        let library = library.to_string_lossy().to_string();
        if cfg!(target_os = "macos") {
            vars.push(("DYLD_INSERT_LIBRARIES".to_string(), library));
            vars.push(("DYLD_FORCE_FLAT_NAMESPACE".to_string(), "1".to_string()));
        } else {
            let existing = std::env::var("LD_PRELOAD").ok();
            let preload = prepend_preload(&library, existing.as_deref());
            vars.push(("LD_PRELOAD".to_string(), preload));
        }
        vars
    }
}

/// Put `library` first in an `LD_PRELOAD` list, keeping every other entry.
///
/// `ld.so` splits the list on colons and whitespace; exact duplicates of
/// `library` are dropped.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn prepend_preload(library: &str, existing: Option<&str>) -> String {
    let mut entries = vec![library];
    entries.extend(
        existing
            .unwrap_or_default()
            .split(|c: char| c == ':' || c.is_ascii_whitespace())
            .filter(|entry| !entry.is_empty() && *entry != library),
    );
    entries.join(":")
}

/// Launcher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hijack: HijackSection,
    pub layer: LayerSection,
    pub log: LogSection,
}

impl Config {
    /// Load config from standard locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Some(Self::project_config_path()),
        )
    }

    /// Load from explicit global/project files, then apply env overrides.
    /// Missing files are skipped.
    pub fn load_from(global: Option<&Path>, project: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("Loading global config from {:?}", global_path);
                let contents = std::fs::read_to_string(global_path)?;
                config = toml::from_str(&contents)?;
            }
        }

        if let Some(project_path) = project {
            if project_path.exists() {
                debug!("Loading project config from {:?}", project_path);
                let contents = std::fs::read_to_string(project_path)?;
                let project_config: Config = toml::from_str(&contents)?;
                config.merge(project_config);
            }
        }

        config.apply_env_overrides();
        config.normalize();

        Ok(config)
    }

    /// Global config path: ~/.dns-hijack/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dns-hijack/config.toml"))
    }

    /// Project config path: .dns-hijack/config.toml
    pub fn project_config_path() -> &'static Path {
        Path::new(".dns-hijack/config.toml")
    }

    /// Merge another config (project overrides set fields only)
    fn merge(&mut self, other: Config) {
        if non_empty(&other.hijack.host).is_some() {
            self.hijack.host = other.hijack.host;
        }
        if non_empty(&other.hijack.addr).is_some() {
            self.hijack.addr = other.hijack.addr;
        }
        if other.layer.library.is_some() {
            self.layer.library = other.layer.library;
        }
        if other.log.level != LogSection::default().level {
            self.log.level = other.log.level;
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Empty variables are ignored so `VAR=` cannot blank a file value.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(host) = lookup(HIJACK_HOST_ENV) {
            self.hijack.host = Some(host);
        }
        if let Some(addr) = lookup(HIJACK_ADDR_ENV) {
            self.hijack.addr = Some(addr);
        }
        if let Some(library) = lookup(LIBRARY_ENV) {
            self.layer.library = Some(PathBuf::from(library));
        }
        if let Some(level) = lookup(LOG_ENV) {
            if let Ok(level) = level.parse() {
                self.log.level = level;
            }
        }
    }

    /// Empty strings in files count as absent.
    fn normalize(&mut self) {
        self.hijack.host = non_empty(&self.hijack.host).map(str::to_string);
        self.hijack.addr = non_empty(&self.hijack.addr).map(str::to_string);
    }

    /// The values a launched child will see.
    pub fn hijack_config(&self) -> HijackConfig {
        HijackConfig {
            host: self.hijack.host.clone(),
            addr: self.hijack.addr.clone(),
        }
    }

    /// Generate default config TOML string
    pub fn default_toml() -> String {
        Config::default().to_toml()
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Hijack target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HijackSection {
    /// Hostname whose first address gets replaced
    pub host: Option<String>,
    /// Replacement address, IPv4 dotted form for IPv4 results
    pub addr: Option<String>,
}

/// Preload library location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSection {
    /// Path to libhijack_layer.so / .dylib (None = search)
    pub library: Option<PathBuf>,
}

/// Launcher logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: LogLevel,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
        }
    }
}
