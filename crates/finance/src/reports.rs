//! Operational reports shown next to the financials: stock, orders, payroll.

use std::collections::BTreeMap;

use serde::Serialize;

use loomledger_core::model::{Employee, InventoryItem, OrderStatus};
use loomledger_core::FixtureStore;

use crate::aggregate::{inventory_value, labor_cost};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub item_count: usize,
    /// Metres across all items.
    pub total_quantity: f64,
    pub total_value: f64,
    pub low_stock: Vec<InventoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub by_status: BTreeMap<OrderStatus, usize>,
    pub completed_value: f64,
    /// Pending plus processing.
    pub open_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollReport {
    pub total_salary: f64,
    pub total_paid: f64,
    pub total_remaining: f64,
    pub unpaid: Vec<Employee>,
}

pub fn inventory_report(store: &FixtureStore) -> InventoryReport {
    InventoryReport {
        item_count: store.inventory.len(),
        total_quantity: store.inventory.iter().map(|i| i.quantity).sum(),
        total_value: inventory_value(&store.inventory),
        low_stock: store.inventory.iter().filter(|i| i.is_low_stock()).cloned().collect(),
    }
}

pub fn order_stats(store: &FixtureStore) -> OrderStats {
    // Every status is present, zero when unused.
    let mut by_status: BTreeMap<OrderStatus, usize> =
        OrderStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut completed_value = 0.0;
    let mut open_value = 0.0;

    for order in &store.orders {
        *by_status.entry(order.status).or_insert(0) += 1;
        if order.status == OrderStatus::Completed {
            completed_value += order.total;
        } else if order.status.is_open() {
            open_value += order.total;
        }
    }

    OrderStats { total_orders: store.orders.len(), by_status, completed_value, open_value }
}

pub fn payroll_report(store: &FixtureStore) -> PayrollReport {
    let total_salary: f64 = store.employees.iter().map(|e| e.salary).sum();
    let total_paid = labor_cost(&store.employees);
    PayrollReport {
        total_salary,
        total_paid,
        total_remaining: total_salary - total_paid,
        unpaid: store.employees.iter().filter(|e| e.remaining() > 0.0).cloned().collect(),
    }
}
