// `loom apply`: run a batch of typed commands against a fixture store.

use std::path::{Path, PathBuf};

use serde::Serialize;

use loomledger_core::Command;

use crate::exit_codes::{EXIT_COMMAND_REJECTED, EXIT_USAGE};
use crate::report::print_json;
use crate::settings::load_store;
use crate::{CliError, InputArgs};

#[derive(Debug, Serialize)]
struct CommandResult {
    index: usize,
    command: Command,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct ApplyOutput {
    applied: usize,
    rejected: usize,
    /// Commands never attempted because of `--fail-fast`.
    skipped: usize,
    results: Vec<CommandResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<PathBuf>,
}

fn parse_batch(path: &Path) -> Result<Vec<Command>, CliError> {
    let input = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&input).map_err(|e| {
        CliError::new(EXIT_USAGE, format!("invalid command batch {}: {e}", path.display()))
            .with_hint("expected a JSON array of objects tagged with \"command\"")
    })
}

pub fn cmd_apply(
    commands: PathBuf,
    input: InputArgs,
    write: Option<PathBuf>,
    fail_fast: bool,
    json: bool,
) -> Result<(), CliError> {
    let batch = parse_batch(&commands)?;
    let mut store = load_store(input.fixtures.as_deref())?;

    let mut results = Vec::with_capacity(batch.len());
    for (index, command) in batch.iter().enumerate() {
        let result = match store.apply(command) {
            Ok(outcome) => CommandResult {
                index,
                command: command.clone(),
                accepted: true,
                entity_id: Some(outcome.entity_id),
                message: outcome.message,
            },
            Err(err) => CommandResult {
                index,
                command: command.clone(),
                accepted: false,
                entity_id: None,
                message: err.to_string(),
            },
        };
        let rejected = !result.accepted;
        results.push(result);
        if rejected && fail_fast {
            break;
        }
    }

    let applied = results.iter().filter(|r| r.accepted).count();
    let rejected = results.len() - applied;
    let skipped = batch.len() - results.len();

    if let Some(path) = &write {
        let text = store.to_json_pretty().map_err(|e| CliError::io(e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        log::info!("wrote {} ({applied} applied)", path.display());
    }

    if json {
        print_json(&ApplyOutput { applied, rejected, skipped, results, written: write })?;
    } else {
        for r in &results {
            let mark = if r.accepted { "ok  " } else { "FAIL" };
            println!("{mark} #{:<3} {}", r.index + 1, r.message);
        }
        eprintln!("{applied} applied, {rejected} rejected, {skipped} skipped");
        if let Some(path) = &write {
            eprintln!("wrote {}", path.display());
        }
    }

    if rejected > 0 {
        let msg = if json { String::new() } else { format!("{rejected} command(s) rejected") };
        return Err(CliError::new(EXIT_COMMAND_REJECTED, msg));
    }
    Ok(())
}
