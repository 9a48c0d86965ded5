use chrono::NaiveDate;

use loomledger_core::model::{Employee, InventoryItem};
use loomledger_core::FixtureStore;

use crate::breakdown::expense_breakdown;
use crate::config::{FinanceConfig, OverheadConfig};
use crate::model::FinancialSummary;
use crate::monthly::monthly_series;

/// Expense inputs shared by the totals and the breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseComponents {
    pub labor: f64,
    pub raw_materials: f64,
    pub overhead: OverheadConfig,
}

impl ExpenseComponents {
    pub fn total(&self) -> f64 {
        self.labor + self.raw_materials + self.overhead.fixed_operational_cost()
    }
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

pub fn inventory_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::value).sum()
}

/// Salaries actually disbursed.
pub fn labor_cost(employees: &[Employee]) -> f64 {
    employees.iter().map(|e| e.paid).sum()
}

/// Heuristic raw-material spend: a fixed share of current stock value.
pub fn raw_materials_estimate(items: &[InventoryItem], ratio: f64) -> f64 {
    (ratio * inventory_value(items)).floor()
}

pub fn expense_components(store: &FixtureStore, config: &FinanceConfig) -> ExpenseComponents {
    ExpenseComponents {
        labor: labor_cost(&store.employees),
        raw_materials: raw_materials_estimate(&store.inventory, config.raw_materials_ratio),
        overhead: config.overhead,
    }
}

/// Reduce the fixture store into a [`FinancialSummary`] as seen on `as_of`.
///
/// Pure: the store is only read, and the same inputs always give an equal
/// summary.
pub fn compute_financials(
    store: &FixtureStore,
    config: &FinanceConfig,
    as_of: NaiveDate,
) -> FinancialSummary {
    let total_revenue: f64 = store.invoices.iter().map(|i| i.amount_received).sum();

    let components = expense_components(store, config);
    let total_expenses = components.total();

    let net_profit = total_revenue - total_expenses;
    let profit_margin = percent_of(net_profit, total_revenue);

    let outstanding_payments: f64 = store.invoices.iter().map(|i| i.amount_remaining()).sum();

    let overdue: Vec<_> = store.invoices.iter().filter(|i| i.is_overdue(as_of)).collect();
    let overdue_amount: f64 = overdue.iter().map(|i| i.amount_remaining()).sum();

    let monthly_data = monthly_series(&store.invoices, total_expenses, config, as_of);
    let expense_breakdown = expense_breakdown(&components);

    log::debug!(
        "financials as of {as_of}: revenue {total_revenue}, expenses {total_expenses}, \
         profit {net_profit}, {} overdue",
        overdue.len()
    );

    FinancialSummary {
        as_of,
        total_revenue,
        total_expenses,
        net_profit,
        profit_margin,
        monthly_data,
        expense_breakdown,
        outstanding_payments,
        overdue_amount,
        overdue_count: overdue.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loomledger_core::model::Invoice;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fabric(quantity: f64, unit_price: f64) -> InventoryItem {
        InventoryItem {
            id: format!("FAB-{quantity}-{unit_price}"),
            kind: "cotton".into(),
            color: "white".into(),
            quantity,
            unit_price,
            min_threshold: 0.0,
        }
    }

    fn scenario_store() -> FixtureStore {
        FixtureStore {
            invoices: vec![Invoice {
                id: "INV-1".into(),
                customer_id: "C-1".into(),
                issue_date: date("2026-10-01"),
                due_date: date("2026-10-31"),
                total: 18000.0,
                amount_received: 3000.0,
            }],
            employees: vec![Employee {
                id: "E-1".into(),
                name: "Salma".into(),
                role: String::new(),
                salary: 9000.0,
                paid: 5000.0,
            }],
            ..FixtureStore::default()
        }
    }

    #[test]
    fn single_invoice_scenario() {
        let summary =
            compute_financials(&scenario_store(), &FinanceConfig::default(), date("2026-10-19"));
        assert_eq!(summary.total_revenue, 3000.0);
        assert_eq!(summary.total_expenses, 12000.0);
        assert_eq!(summary.net_profit, -9000.0);
        assert_eq!(summary.profit_margin, -300.0);
        assert_eq!(summary.outstanding_payments, 15000.0);
        assert_eq!(summary.overdue_count, 0);
    }

    #[test]
    fn empty_store_uses_fixed_baseline_only() {
        let summary =
            compute_financials(&FixtureStore::default(), &FinanceConfig::default(), date("2026-10-19"));
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_expenses, 7000.0);
        assert_eq!(summary.net_profit, -7000.0);
        assert_eq!(summary.profit_margin, 0.0);
        assert_eq!(summary.outstanding_payments, 0.0);
        assert_eq!(summary.overdue_amount, 0.0);
        assert!(summary.expense_breakdown.iter().all(|l| l.percentage.is_finite()));
    }

    #[test]
    fn overdue_totals() {
        let mut store = scenario_store();
        let summary = compute_financials(&store, &FinanceConfig::default(), date("2026-11-05"));
        assert_eq!(summary.overdue_count, 1);
        assert_eq!(summary.overdue_amount, 15000.0);

        store.invoices[0].amount_received = 18000.0;
        let summary = compute_financials(&store, &FinanceConfig::default(), date("2026-11-05"));
        assert_eq!(summary.overdue_count, 0);
    }

    #[test]
    fn raw_materials_are_floored() {
        // 0.3 * (10 * 3.33) = 9.99
        assert_eq!(raw_materials_estimate(&[fabric(10.0, 3.33)], 0.3), 9.0);
        assert_eq!(raw_materials_estimate(&[fabric(21140.0, 1.0)], 0.3), 6342.0);
        assert_eq!(raw_materials_estimate(&[], 0.3), 0.0);
    }

    #[test]
    fn raw_materials_floor_is_plain() {
        // 25 * 9.2 is 229.99999999999997, so 0.3 of it sits just under 69.
        let items = [fabric(25.0, 9.2)];
        let value = inventory_value(&items);
        assert_eq!(raw_materials_estimate(&items, 0.3), (0.3 * value).floor());
        assert_eq!(raw_materials_estimate(&items, 0.3), 68.0);

        let mut store = scenario_store();
        store.employees.clear();
        store.inventory = items.to_vec();
        let summary = compute_financials(&store, &FinanceConfig::default(), date("2026-10-19"));
        assert_eq!(summary.total_expenses, (0.3 * value).floor() + 7000.0);
    }

    #[test]
    fn expenses_include_inventory_estimate() {
        let mut store = scenario_store();
        store.inventory = vec![fabric(100.0, 12.0), fabric(50.0, 20.0)];
        let summary = compute_financials(&store, &FinanceConfig::default(), date("2026-10-19"));
        // 5000 + floor(0.3 * 2200) + 7000
        assert_eq!(summary.total_expenses, 5000.0 + 660.0 + 7000.0);
    }

    #[test]
    fn percent_guard() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(-5.0, 0.0), 0.0);
        assert_eq!(percent_of(25.0, 200.0), 12.5);
    }
}
