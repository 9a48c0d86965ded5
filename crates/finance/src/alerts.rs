use chrono::NaiveDate;
use serde::Serialize;

use loomledger_core::FixtureStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OverdueInvoice,
    LowStock,
    UnpaidSalary,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverdueInvoice => write!(f, "overdue_invoice"),
            Self::LowStock => write!(f, "low_stock"),
            Self::UnpaidSalary => write!(f, "unpaid_salary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub entity_id: String,
    pub message: String,
}

/// Notifications derived from the store as of `as_of`.
///
/// Overdue invoices come first (longest overdue first), then low stock, then
/// outstanding salaries. Within a kind, store order is kept.
pub fn derive_alerts(store: &FixtureStore, as_of: NaiveDate) -> Vec<Alert> {
    let mut overdue: Vec<_> = store.invoices.iter().filter(|i| i.is_overdue(as_of)).collect();
    overdue.sort_by_key(|i| std::cmp::Reverse(i.days_overdue(as_of)));

    let mut alerts: Vec<Alert> = overdue
        .into_iter()
        .map(|inv| {
            let customer = store.customer(&inv.customer_id).map_or(inv.customer_id.as_str(), |c| c.name.as_str());
            Alert {
                kind: AlertKind::OverdueInvoice,
                entity_id: inv.id.clone(),
                message: format!(
                    "invoice {} for {customer} is {} days overdue ({} outstanding)",
                    inv.id,
                    inv.days_overdue(as_of),
                    inv.amount_remaining()
                ),
            }
        })
        .collect();

    alerts.extend(store.inventory.iter().filter(|i| i.is_low_stock()).map(|item| Alert {
        kind: AlertKind::LowStock,
        entity_id: item.id.clone(),
        message: format!(
            "{} {} is low: {} m left (minimum {} m)",
            item.color, item.kind, item.quantity, item.min_threshold
        ),
    }));

    alerts.extend(store.employees.iter().filter(|e| e.remaining() > 0.0).map(|emp| Alert {
        kind: AlertKind::UnpaidSalary,
        entity_id: emp.id.clone(),
        message: format!("{} is owed {} of {} salary", emp.name, emp.remaining(), emp.salary),
    }));

    log::debug!("{} alerts as of {as_of}", alerts.len());
    alerts
}
