// Reporting commands: summary, check, export, alerts, report, fixtures.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use loomledger_core::seed::textile_factory;
use loomledger_core::ReferenceTotals;
use loomledger_finance::export::write_summary_csv;
use loomledger_finance::reports::{inventory_report, order_stats, payroll_report};
use loomledger_finance::{
    check_consistency, compute_financials, derive_alerts, ConsistencyReport, FinancialSummary,
};

use crate::exit_codes::EXIT_INCONSISTENT;
use crate::settings::{load_reference, resolve};
use crate::{render, CliError, InputArgs, ReportKind};

/// Serialize one JSON value to stdout. Every `--json` path goes through here
/// so stdout always holds exactly one document.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization failed: {e}")))?;
    println!("{text}");
    Ok(())
}

pub fn cmd_summary(input: InputArgs, json: bool) -> Result<(), CliError> {
    let inputs = resolve(&input)?;
    let summary = compute_financials(&inputs.store, &inputs.config, inputs.as_of);
    if json {
        print_json(&summary)
    } else {
        print!("{}", render::summary(&summary));
        Ok(())
    }
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    as_of: chrono::NaiveDate,
    reference: &'a ReferenceTotals,
    #[serde(flatten)]
    report: &'a ConsistencyReport,
}

pub fn cmd_check(input: InputArgs, reference: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let inputs = resolve(&input)?;

    let reference = match reference {
        Some(path) => load_reference(&path)?,
        None => inputs.store.reference.ok_or_else(|| {
            CliError::usage("no reference totals to check against")
                .with_hint("add a `reference` block to the fixture document or pass --reference")
        })?,
    };

    let summary = compute_financials(&inputs.store, &inputs.config, inputs.as_of);
    let report = check_consistency(&summary, &reference, &inputs.config.consistency);

    if json {
        print_json(&CheckOutput { as_of: inputs.as_of, reference: &reference, report: &report })?;
    } else {
        print!("{}", render::consistency(&report));
        for issue in &report.issues {
            eprintln!("  {issue}");
        }
    }

    if report.is_consistent() {
        Ok(())
    } else if json {
        // The JSON document already carries the issues.
        Err(CliError::new(EXIT_INCONSISTENT, ""))
    } else {
        Err(CliError::new(
            EXIT_INCONSISTENT,
            format!("computed totals disagree with reference (score {:.1})", report.score),
        ))
    }
}

pub fn cmd_export(input: InputArgs, output: Option<PathBuf>) -> Result<(), CliError> {
    let inputs = resolve(&input)?;
    let summary = compute_financials(&inputs.store, &inputs.config, inputs.as_of);

    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;
            write_csv(&summary, file)?;
            eprintln!("wrote {}", path.display());
        }
        None => write_csv(&summary, std::io::stdout().lock())?,
    }
    Ok(())
}

fn write_csv<W: Write>(summary: &FinancialSummary, writer: W) -> Result<(), CliError> {
    write_summary_csv(summary, writer).map_err(|e| CliError::io(e.to_string()))
}

pub fn cmd_alerts(input: InputArgs, json: bool) -> Result<(), CliError> {
    let inputs = resolve(&input)?;
    let alerts = derive_alerts(&inputs.store, inputs.as_of);
    if json {
        print_json(&alerts)
    } else {
        print!("{}", render::alerts(&alerts));
        Ok(())
    }
}

pub fn cmd_report(kind: ReportKind, input: InputArgs, json: bool) -> Result<(), CliError> {
    let inputs = resolve(&input)?;
    let store = &inputs.store;

    match kind {
        ReportKind::Inventory => {
            let report = inventory_report(store);
            if json {
                return print_json(&report);
            }
            print!("{}", render::inventory(&report));
        }
        ReportKind::Orders => {
            let stats = order_stats(store);
            if json {
                return print_json(&stats);
            }
            print!("{}", render::orders(&stats));
        }
        ReportKind::Payroll => {
            let report = payroll_report(store);
            if json {
                return print_json(&report);
            }
            print!("{}", render::payroll(&report));
        }
    }
    Ok(())
}

pub fn cmd_fixtures() -> Result<(), CliError> {
    let text = textile_factory()
        .to_json_pretty()
        .map_err(|e| CliError::io(e.to_string()))?;
    println!("{text}");
    Ok(())
}
