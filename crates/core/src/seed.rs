//! Built-in dataset for a mid-sized textile factory.
//!
//! Used when no fixture file is supplied. The curated reference totals agree
//! with what the aggregator computes under the default finance config.

use chrono::NaiveDate;

use crate::model::{
    Customer, Employee, InventoryItem, Invoice, Order, OrderStatus, ReferenceTotals, Supplier,
};
use crate::store::FixtureStore;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("literal calendar date")
}

fn customer(id: &str, name: &str, phone: &str, city: &str) -> Customer {
    Customer { id: id.into(), name: name.into(), phone: phone.into(), city: city.into() }
}

fn supplier(id: &str, name: &str, material: &str, phone: &str) -> Supplier {
    Supplier { id: id.into(), name: name.into(), material: material.into(), phone: phone.into() }
}

fn order(id: &str, customer_id: &str, status: OrderStatus, total: f64, date: NaiveDate) -> Order {
    Order { id: id.into(), customer_id: customer_id.into(), status, total, date }
}

fn invoice(
    id: &str,
    customer_id: &str,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    total: f64,
    amount_received: f64,
) -> Invoice {
    Invoice {
        id: id.into(),
        customer_id: customer_id.into(),
        issue_date,
        due_date,
        total,
        amount_received,
    }
}

fn fabric(id: &str, kind: &str, color: &str, quantity: f64, unit_price: f64, min: f64) -> InventoryItem {
    InventoryItem {
        id: id.into(),
        kind: kind.into(),
        color: color.into(),
        quantity,
        unit_price,
        min_threshold: min,
    }
}

fn employee(id: &str, name: &str, role: &str, salary: f64, paid: f64) -> Employee {
    Employee { id: id.into(), name: name.into(), role: role.into(), salary, paid }
}

pub fn textile_factory() -> FixtureStore {
    use OrderStatus::*;

    FixtureStore {
        customers: vec![
            customer("C-001", "Nile Garments Co.", "+20 2 2345 6789", "Cairo"),
            customer("C-002", "Delta Uniforms", "+20 3 4876 1120", "Alexandria"),
            customer("C-003", "Atlas Home Textiles", "+20 2 3571 9904", "Giza"),
            customer("C-004", "Sahara Fashion House", "+20 50 223 4410", "Mansoura"),
            customer("C-005", "Red Sea Hospitality", "+20 65 344 7781", "Hurghada"),
        ],
        suppliers: vec![
            supplier("S-001", "Golden Thread Spinning", "yarn", "+20 40 331 2200"),
            supplier("S-002", "Coloris Dye Works", "dye", "+20 2 2687 4433"),
            supplier("S-003", "Delta Cotton Ginning", "raw cotton", "+20 45 318 0095"),
        ],
        orders: vec![
            order("ORD-001", "C-001", Completed, 12500.0, ymd(2026, 5, 2)),
            order("ORD-002", "C-002", Processing, 18000.0, ymd(2026, 6, 8)),
            order("ORD-003", "C-003", Completed, 9400.0, ymd(2026, 6, 28)),
            order("ORD-004", "C-001", Processing, 22000.0, ymd(2026, 8, 10)),
            order("ORD-005", "C-004", Pending, 7600.0, ymd(2026, 8, 29)),
            order("ORD-006", "C-005", Completed, 14300.0, ymd(2026, 9, 15)),
            order("ORD-007", "C-002", Pending, 11200.0, ymd(2026, 10, 1)),
            order("ORD-008", "C-003", Cancelled, 5200.0, ymd(2026, 7, 19)),
        ],
        invoices: vec![
            invoice("INV-2026-001", "C-001", ymd(2026, 5, 6), ymd(2026, 6, 5), 12500.0, 12500.0),
            invoice("INV-2026-002", "C-002", ymd(2026, 6, 12), ymd(2026, 7, 12), 18000.0, 3000.0),
            invoice("INV-2026-003", "C-003", ymd(2026, 7, 3), ymd(2026, 8, 2), 9400.0, 9400.0),
            invoice("INV-2026-004", "C-001", ymd(2026, 8, 15), ymd(2026, 9, 14), 22000.0, 15000.0),
            invoice("INV-2026-005", "C-004", ymd(2026, 9, 2), ymd(2026, 10, 2), 7600.0, 0.0),
            invoice("INV-2026-006", "C-005", ymd(2026, 9, 20), ymd(2026, 10, 20), 14300.0, 14300.0),
            invoice("INV-2026-007", "C-002", ymd(2026, 10, 5), ymd(2026, 11, 4), 11200.0, 4000.0),
        ],
        inventory: vec![
            fabric("FAB-001", "Cotton", "White", 450.0, 12.0, 100.0),
            fabric("FAB-002", "Linen", "Beige", 80.0, 18.0, 100.0),
            fabric("FAB-003", "Silk", "Crimson", 60.0, 45.0, 40.0),
            fabric("FAB-004", "Polyester", "Navy", 900.0, 6.0, 200.0),
            fabric("FAB-005", "Denim", "Indigo", 120.0, 15.0, 150.0),
            fabric("FAB-006", "Wool", "Charcoal", 200.0, 22.0, 50.0),
        ],
        employees: vec![
            employee("E-001", "Karim Mansour", "Weaving Supervisor", 9000.0, 9000.0),
            employee("E-002", "Salma Haddad", "Dye Technician", 7000.0, 5000.0),
            employee("E-003", "Youssef Adel", "Loom Operator", 5500.0, 5500.0),
            employee("E-004", "Mona Fathy", "Quality Inspector", 6000.0, 3000.0),
            employee("E-005", "Omar Nabil", "Warehouse Clerk", 4500.0, 4500.0),
        ],
        reference: Some(ReferenceTotals { revenue: 58200.0, expenses: 40342.0, profit: 17858.0 }),
    }
}
