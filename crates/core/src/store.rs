//! The fixture store: the in-memory dataset every report is computed from.
//!
//! Documents are JSON. Loading goes through [`FixtureStore::from_document`],
//! which rejects malformed data up front so the aggregation code can assume
//! well-formed entities.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FixtureError;
use crate::model::{
    Customer, Employee, InventoryItem, Invoice, Order, PaymentStatus, ReferenceTotals, Supplier,
    AMOUNT_EPSILON,
};

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Invoice as it appears in a fixture document. The derived fields are
/// optional; when present they are checked against the amounts.
///
/// `total` may be omitted when `amountRemaining` is given, in which case it
/// is `amountReceived + amountRemaining`. A stated `isOverdue` is read but
/// never trusted: overdue is recomputed against the reporting date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub customer_id: String,
    #[serde(alias = "date")]
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    pub amount_received: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_remaining: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing)]
    pub is_overdue: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureDocument {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceTotals>,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureStore {
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub orders: Vec<Order>,
    pub invoices: Vec<Invoice>,
    pub inventory: Vec<InventoryItem>,
    pub employees: Vec<Employee>,
    pub reference: Option<ReferenceTotals>,
}

impl FixtureStore {
    pub fn from_json(input: &str) -> Result<Self, FixtureError> {
        let doc: FixtureDocument =
            serde_json::from_str(input).map_err(|e| FixtureError::Parse(e.to_string()))?;
        Self::from_document(doc)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Io(format!("cannot read {}: {e}", path.display())))?;
        let store = Self::from_json(&input)?;
        log::debug!(
            "loaded fixtures from {}: {} invoices, {} orders, {} inventory items, {} employees",
            path.display(),
            store.invoices.len(),
            store.orders.len(),
            store.inventory.len(),
            store.employees.len(),
        );
        Ok(store)
    }

    /// Validate a parsed document and build the store.
    pub fn from_document(doc: FixtureDocument) -> Result<Self, FixtureError> {
        unique_ids("customer", doc.customers.iter().map(|c| c.id.as_str()))?;
        unique_ids("supplier", doc.suppliers.iter().map(|s| s.id.as_str()))?;
        unique_ids("order", doc.orders.iter().map(|o| o.id.as_str()))?;
        unique_ids("invoice", doc.invoices.iter().map(|i| i.id.as_str()))?;
        unique_ids("inventory item", doc.inventory.iter().map(|i| i.id.as_str()))?;
        unique_ids("employee", doc.employees.iter().map(|e| e.id.as_str()))?;

        let customers: HashSet<&str> = doc.customers.iter().map(|c| c.id.as_str()).collect();

        for order in &doc.orders {
            non_negative("order", &order.id, "total", order.total)?;
            if !customers.contains(order.customer_id.as_str()) {
                return Err(FixtureError::UnknownReference {
                    kind: "order",
                    id: order.id.clone(),
                    reference: order.customer_id.clone(),
                });
            }
        }

        for item in &doc.inventory {
            non_negative("inventory item", &item.id, "quantity", item.quantity)?;
            non_negative("inventory item", &item.id, "unit price", item.unit_price)?;
            non_negative("inventory item", &item.id, "minimum threshold", item.min_threshold)?;
        }

        for emp in &doc.employees {
            non_negative("employee", &emp.id, "salary", emp.salary)?;
            non_negative("employee", &emp.id, "paid", emp.paid)?;
            if emp.paid > emp.salary + AMOUNT_EPSILON {
                return Err(FixtureError::InvalidAmount {
                    kind: "employee",
                    id: emp.id.clone(),
                    field: "paid (exceeds salary)",
                    value: emp.paid,
                });
            }
        }

        let mut invoices = Vec::with_capacity(doc.invoices.len());
        for record in doc.invoices {
            if !customers.contains(record.customer_id.as_str()) {
                return Err(FixtureError::UnknownReference {
                    kind: "invoice",
                    id: record.id.clone(),
                    reference: record.customer_id.clone(),
                });
            }
            invoices.push(validate_invoice(record)?);
        }

        Ok(Self {
            customers: doc.customers,
            suppliers: doc.suppliers,
            orders: doc.orders,
            invoices,
            inventory: doc.inventory,
            employees: doc.employees,
            reference: doc.reference,
        })
    }

    /// Document form with the derived invoice fields filled in.
    pub fn to_document(&self) -> FixtureDocument {
        FixtureDocument {
            customers: self.customers.clone(),
            suppliers: self.suppliers.clone(),
            orders: self.orders.clone(),
            invoices: self
                .invoices
                .iter()
                .map(|inv| InvoiceRecord {
                    id: inv.id.clone(),
                    customer_id: inv.customer_id.clone(),
                    issue_date: inv.issue_date,
                    due_date: inv.due_date,
                    total: Some(inv.total),
                    amount_received: inv.amount_received,
                    amount_remaining: Some(inv.amount_remaining()),
                    payment_status: Some(inv.payment_status()),
                    is_overdue: None,
                })
                .collect(),
            inventory: self.inventory.clone(),
            employees: self.employees.clone(),
            reference: self.reference,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, FixtureError> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| FixtureError::Parse(format!("JSON serialization error: {e}")))
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FixtureError::DuplicateId { kind, id: id.to_string() });
        }
    }
    Ok(())
}

fn non_negative(
    kind: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), FixtureError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FixtureError::InvalidAmount { kind, id: id.to_string(), field, value });
    }
    Ok(())
}

fn validate_invoice(record: InvoiceRecord) -> Result<Invoice, FixtureError> {
    non_negative("invoice", &record.id, "amount received", record.amount_received)?;

    let total = match (record.total, record.amount_remaining) {
        (Some(total), _) => total,
        (None, Some(remaining)) => {
            non_negative("invoice", &record.id, "amount remaining", remaining)?;
            record.amount_received + remaining
        }
        (None, None) => {
            return Err(FixtureError::InconsistentInvoice {
                id: record.id,
                detail: "needs total or amountRemaining".into(),
            })
        }
    };
    non_negative("invoice", &record.id, "total", total)?;

    if let Some(stated) = record.is_overdue {
        log::debug!("invoice '{}': ignoring stated isOverdue={stated}, derived from due date", record.id);
    }

    if record.amount_received > total + AMOUNT_EPSILON {
        return Err(FixtureError::InconsistentInvoice {
            id: record.id,
            detail: format!("amount received {} exceeds total {total}", record.amount_received),
        });
    }
    if record.due_date < record.issue_date {
        return Err(FixtureError::InvalidDate {
            id: record.id,
            detail: format!(
                "due date {} is before issue date {}",
                record.due_date, record.issue_date
            ),
        });
    }

    let invoice = Invoice {
        id: record.id,
        customer_id: record.customer_id,
        issue_date: record.issue_date,
        due_date: record.due_date,
        total,
        amount_received: record.amount_received,
    };

    if let Some(stated) = record.amount_remaining {
        let derived = invoice.amount_remaining();
        if (stated - derived).abs() > AMOUNT_EPSILON {
            return Err(FixtureError::InconsistentInvoice {
                id: invoice.id,
                detail: format!("amount remaining {stated} != total - received ({derived})"),
            });
        }
    }
    if let Some(stated) = record.payment_status {
        let derived = invoice.payment_status();
        if stated != derived {
            return Err(FixtureError::InconsistentInvoice {
                id: invoice.id,
                detail: format!("payment status '{stated}' but amounts say '{derived}'"),
            });
        }
    }

    Ok(invoice)
}
