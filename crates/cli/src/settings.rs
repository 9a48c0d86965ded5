//! Resolution of the inputs every reporting command shares: fixture store,
//! finance config, reference totals and the `as_of` date.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use loomledger_core::seed::textile_factory;
use loomledger_core::{FixtureStore, ReferenceTotals};
use loomledger_finance::FinanceConfig;

use crate::exit_codes::EXIT_INVALID_CONFIG;
use crate::{CliError, InputArgs};

/// Fully resolved inputs for one invocation.
pub struct Inputs {
    pub store: FixtureStore,
    pub config: FinanceConfig,
    pub as_of: NaiveDate,
}

pub fn resolve(args: &InputArgs) -> Result<Inputs, CliError> {
    Ok(Inputs {
        store: load_store(args.fixtures.as_deref())?,
        config: load_config(args.config.as_deref())?,
        as_of: args.as_of.unwrap_or_else(|| chrono::Local::now().date_naive()),
    })
}

pub fn load_store(path: Option<&Path>) -> Result<FixtureStore, CliError> {
    match path {
        Some(path) => FixtureStore::load(path).map_err(|e| {
            CliError::fixtures(e).with_hint(format!("while loading {}", path.display()))
        }),
        None => {
            log::debug!("no fixture file given, using built-in dataset");
            Ok(textile_factory())
        }
    }
}

/// Default location of the user's finance config.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("loomledger").join("finance.toml"))
}

/// Explicit path, else the user config file when it exists, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<FinanceConfig, CliError> {
    if let Some(path) = path {
        return FinanceConfig::from_path(path).map_err(|e| {
            CliError::config(e).with_hint(format!("while loading {}", path.display()))
        });
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            log::debug!("using config {}", path.display());
            FinanceConfig::from_path(&path).map_err(|e| {
                CliError::config(e).with_hint(format!(
                    "fix or remove {}, or pass --config",
                    path.display()
                ))
            })
        }
        _ => Ok(FinanceConfig::default()),
    }
}

/// Reference totals from a standalone JSON or TOML file (by extension).
pub fn load_reference(path: &Path) -> Result<ReferenceTotals, CliError> {
    let input = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;

    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    let parsed = if is_toml {
        toml::from_str::<ReferenceTotals>(&input).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<ReferenceTotals>(&input).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| {
        CliError::new(EXIT_INVALID_CONFIG, format!("invalid reference {}: {e}", path.display()))
            .with_hint("expected revenue, expenses and profit fields")
    })
}
