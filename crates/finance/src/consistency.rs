use loomledger_core::ReferenceTotals;

use crate::config::ConsistencyConfig;
use crate::model::{ConsistencyReport, ConsistencyStatus, FinancialSummary, Metric, MetricCheck};

/// Compare computed totals with the curated reference.
///
/// Revenue and expenses must match exactly; profit matches when the absolute
/// difference is below `config.profit_tolerance`. Mismatches are reported,
/// never corrected.
pub fn check_consistency(
    computed: &FinancialSummary,
    reference: &ReferenceTotals,
    config: &ConsistencyConfig,
) -> ConsistencyReport {
    let checks = vec![
        exact(Metric::Revenue, computed.total_revenue, reference.revenue),
        exact(Metric::Expenses, computed.total_expenses, reference.expenses),
        within(Metric::Profit, computed.net_profit, reference.profit, config.profit_tolerance),
    ];

    let matched = checks.iter().filter(|c| c.matches).count();
    let score = round1(matched as f64 / checks.len() as f64 * 100.0);

    let issues: Vec<String> = checks
        .iter()
        .filter(|c| !c.matches)
        .map(|c| {
            format!(
                "{} mismatch: computed {} vs reference {} (difference {})",
                c.metric, c.computed, c.reference, c.difference
            )
        })
        .collect();

    let status = if matched == checks.len() {
        ConsistencyStatus::Consistent
    } else {
        ConsistencyStatus::Inconsistent
    };

    for issue in &issues {
        log::info!("{issue}");
    }

    ConsistencyReport { checks, score, issues, status }
}

fn exact(metric: Metric, computed: f64, reference: f64) -> MetricCheck {
    MetricCheck {
        metric,
        computed,
        reference,
        difference: computed - reference,
        matches: computed == reference,
    }
}

fn within(metric: Metric, computed: f64, reference: f64, tolerance: f64) -> MetricCheck {
    let difference = computed - reference;
    MetricCheck { metric, computed, reference, difference, matches: difference.abs() < tolerance }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
