//! `loom config` - inspect and validate the finance config.

use std::path::PathBuf;

use clap::Subcommand;

use loomledger_finance::FinanceConfig;

use crate::settings::{default_config_path, load_config};
use crate::CliError;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a finance config without computing anything
    #[command(after_help = "\
Examples:
  loom config validate finance.toml
  loom config validate            # checks the user config, if any")]
    Validate {
        /// Path to the config (default: user config file)
        path: Option<PathBuf>,
    },

    /// Print the default user config location
    Path,

    /// Print the effective config as TOML
    #[command(after_help = "\
Examples:
  loom config show > ~/.config/loomledger/finance.toml")]
    Show {
        #[arg(long, env = "LOOM_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub fn cmd_config(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Validate { path } => cmd_validate(path),
        ConfigCommands::Path => {
            let path = default_config_path()
                .ok_or_else(|| CliError::io("no config directory on this platform"))?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show { config } => {
            let config = load_config(config.as_deref())?;
            print_toml(&config)
        }
    }
}

fn cmd_validate(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = match path.or_else(default_config_path) {
        Some(p) if p.is_file() => p,
        Some(p) => {
            return Err(CliError::io(format!("{} does not exist", p.display()))
                .with_hint("defaults apply when no config file is present"))
        }
        None => return Err(CliError::usage("no config path given")),
    };

    let config = load_config(Some(&path))?;
    eprintln!(
        "{}: ok ({} months, fallback {}, fixed overhead {})",
        path.display(),
        config.months,
        config.monthly_fallback,
        config.overhead.fixed_operational_cost()
    );
    Ok(())
}

fn print_toml(config: &FinanceConfig) -> Result<(), CliError> {
    let text = config.to_toml().map_err(|e| CliError::io(e.to_string()))?;
    print!("{text}");
    Ok(())
}
