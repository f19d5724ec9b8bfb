//! # dns-hijack CLI
//!
//! Launcher for the `gethostbyname` hijack layer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hijack_config::logging::init_logging;
use hijack_config::{Config, LogLevel};

mod launch;
mod lookup;

/// Redirect one hostname to a spoofed address for a child process
#[derive(Parser)]
#[command(name = "dns-hijack")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (overrides config; RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Hijack target, overriding config files and environment
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Hostname to hijack (HIJACK_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Replacement address (HIJACK_ADDR)
    #[arg(long)]
    pub addr: Option<String>,
}

impl TargetArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.hijack.host = Some(host.clone());
        }
        if let Some(addr) = &self.addr {
            config.hijack.addr = Some(addr.clone());
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command with the layer preloaded
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Path to the layer library
        #[arg(long)]
        library: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Print shell exports for `eval "$(dns-hijack env)"`
    Env {
        #[command(flatten)]
        target: TargetArgs,

        /// Path to the layer library
        #[arg(long)]
        library: Option<PathBuf>,
    },

    /// Resolve a name in-process and show what the layer would do
    Lookup {
        /// Hostname to resolve
        name: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print config file locations
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    init_logging(cli.log_level.unwrap_or(config.log.level));

    match cli.command {
        Commands::Run {
            target,
            library,
            command,
        } => {
            target.apply(&mut config);
            launch::cmd_run(&config, library.as_deref(), &command)
        }
        Commands::Env { target, library } => {
            target.apply(&mut config);
            launch::cmd_env(&config, library.as_deref())
        }
        Commands::Lookup { name, target, json } => {
            target.apply(&mut config);
            lookup::cmd_lookup(&config, &name, json)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                print!("{}", config.to_toml());
                Ok(())
            }
            ConfigCommands::Path => {
                match Config::global_config_path() {
                    Some(path) => println!("Global:  {}", path.display()),
                    None => println!("Global:  (no home directory)"),
                }
                println!("Project: {}", Config::project_config_path().display());
                Ok(())
            }
        },
    }
}
