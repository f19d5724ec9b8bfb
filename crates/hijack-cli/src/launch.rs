//! # Launch Commands
//!
//! - `dns-hijack run -- <cmd>` - run a child with the layer preloaded
//! - `dns-hijack env` - print shell exports for `eval`

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use console::{style, Emoji};
use hijack_config::{log_cli_debug, log_cli_info, Config};
use hijack_core::parse_inet_aton;

static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

#[cfg(target_os = "macos")]
const LAYER_FILE: &str = "libhijack_layer.dylib";
#[cfg(not(target_os = "macos"))]
const LAYER_FILE: &str = "libhijack_layer.so";

/// Execute `command` under the layer and exit with its status.
pub fn cmd_run(config: &Config, library: Option<&Path>, command: &[String]) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("No command given to run")?;

    let library = find_layer_library(library.or(config.layer.library.as_deref()))?;
    let hijack = config.hijack_config();
    warn_on_target(config);

    log_cli_info!(
        "Launching under hijack layer",
        program = program.as_str(),
        library = tracing::field::display(library.display())
    );

    let status = Command::new(program)
        .args(args)
        .envs(hijack.preload_env(&library))
        .status()
        .with_context(|| format!("Failed to spawn {}", program))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}

/// Generate shell script for `eval "$(dns-hijack env)"`
pub fn cmd_env(config: &Config, library: Option<&Path>) -> Result<()> {
    let library = find_layer_library(library.or(config.layer.library.as_deref()))?;
    warn_on_target(config);

    for (key, value) in config.hijack_config().preload_env(&library) {
        println!("export {}={}", key, shell_quote(&value));
    }
    Ok(())
}

/// The layer silently passes lookups through in these cases; say so up front.
fn warn_on_target(config: &Config) {
    let hijack = &config.hijack;
    match (&hijack.host, &hijack.addr) {
        (Some(_), Some(addr)) => {
            if parse_inet_aton(addr).is_none() {
                eprintln!(
                    "{}{}",
                    WARN,
                    style(format!(
                        "HIJACK_ADDR {:?} is not an IPv4 address; lookups will not be rewritten",
                        addr
                    ))
                    .yellow()
                );
            }
        }
        _ => {
            eprintln!(
                "{}{}",
                WARN,
                style("HIJACK_HOST and HIJACK_ADDR are not both set; lookups pass through")
                    .yellow()
            );
        }
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Locate the layer library.
///
/// An explicit path must exist. Otherwise look next to the executable, in
/// `../lib`, and in the cargo target directory.
pub fn find_layer_library(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return path
                .canonicalize()
                .with_context(|| format!("resolve {}", path.display()));
        }
        anyhow::bail!("Layer library not found at {}", path.display());
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            // Same directory as the dns-hijack binary
            let sibling = exe_dir.join(LAYER_FILE);
            if sibling.exists() {
                return Ok(sibling);
            }

            // ../lib/ relative to bin/
            let lib_dir = exe_dir.parent().map(|p| p.join("lib").join(LAYER_FILE));
            if let Some(lib_path) = lib_dir {
                if lib_path.exists() {
                    return Ok(lib_path);
                }
            }
        }
    }

    // Development mode
    for profile in ["debug", "release"] {
        let candidate = Path::new("target").join(profile).join(LAYER_FILE);
        if candidate.exists() {
            log_cli_debug!(
                "Using layer from target directory",
                profile = profile
            );
            return candidate.canonicalize().context("resolve target path");
        }
    }

    anyhow::bail!(
        "Could not find {}. Please run 'cargo build -p hijack-layer' first or pass --library.",
        LAYER_FILE
    )
}
