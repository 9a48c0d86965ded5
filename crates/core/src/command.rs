//! Typed commands replacing the dashboard's free-form forms.
//!
//! Every command is validated on its own first (amounts, ids), then against
//! the store. A rejected command leaves the store untouched; an accepted one
//! returns an [`Outcome`] for the caller to present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::model::{Order, OrderStatus, AMOUNT_EPSILON};
use crate::store::FixtureStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    RecordPayment(RecordPayment),
    PayEmployee(PayEmployee),
    Restock(Restock),
    PlaceOrder(PlaceOrder),
    UpdateOrderStatus(UpdateOrderStatus),
}

/// Register money received against an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub invoice_id: String,
    pub amount: f64,
}

/// Disburse part or all of an employee's outstanding salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayEmployee {
    pub employee_id: String,
    pub amount: f64,
}

/// Add metres of fabric to an existing inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restock {
    pub item_id: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub id: String,
    pub customer_id: String,
    pub total: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Result of an accepted command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub entity_id: String,
    pub message: String,
}

impl Outcome {
    fn new(entity_id: &str, message: String) -> Self {
        Self { entity_id: entity_id.to_string(), message }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), CommandError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CommandError::InvalidAmount { field, value });
    }
    Ok(())
}

impl Command {
    /// Checks that need no store access.
    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            Self::RecordPayment(c) => positive("amount", c.amount),
            Self::PayEmployee(c) => positive("amount", c.amount),
            Self::Restock(c) => positive("quantity", c.quantity),
            Self::PlaceOrder(c) => positive("total", c.total),
            Self::UpdateOrderStatus(_) => Ok(()),
        }
    }
}

impl FixtureStore {
    pub fn apply(&mut self, command: &Command) -> Result<Outcome, CommandError> {
        command.validate()?;
        let outcome = match command {
            Command::RecordPayment(c) => self.record_payment(c),
            Command::PayEmployee(c) => self.pay_employee(c),
            Command::Restock(c) => self.restock(c),
            Command::PlaceOrder(c) => self.place_order(c),
            Command::UpdateOrderStatus(c) => self.update_order_status(c),
        };
        match &outcome {
            Ok(o) => log::info!("{}", o.message),
            Err(e) => log::warn!("command rejected: {e}"),
        }
        outcome
    }

    fn record_payment(&mut self, cmd: &RecordPayment) -> Result<Outcome, CommandError> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|i| i.id == cmd.invoice_id)
            .ok_or_else(|| CommandError::NotFound { kind: "invoice", id: cmd.invoice_id.clone() })?;

        let remaining = invoice.amount_remaining();
        if cmd.amount > remaining + AMOUNT_EPSILON {
            return Err(CommandError::Overpayment {
                id: invoice.id.clone(),
                amount: cmd.amount,
                remaining,
            });
        }
        invoice.amount_received += cmd.amount;
        Ok(Outcome::new(
            &invoice.id,
            format!(
                "recorded payment of {} on invoice {} ({}, remaining {})",
                cmd.amount,
                invoice.id,
                invoice.payment_status(),
                invoice.amount_remaining()
            ),
        ))
    }

    fn pay_employee(&mut self, cmd: &PayEmployee) -> Result<Outcome, CommandError> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == cmd.employee_id)
            .ok_or_else(|| CommandError::NotFound { kind: "employee", id: cmd.employee_id.clone() })?;

        let remaining = employee.remaining();
        if cmd.amount > remaining + AMOUNT_EPSILON {
            return Err(CommandError::Overpayment {
                id: employee.id.clone(),
                amount: cmd.amount,
                remaining,
            });
        }
        employee.paid += cmd.amount;
        Ok(Outcome::new(
            &employee.id,
            format!(
                "paid {} to {} (remaining {})",
                cmd.amount,
                employee.name,
                employee.remaining()
            ),
        ))
    }

    fn restock(&mut self, cmd: &Restock) -> Result<Outcome, CommandError> {
        let item = self
            .inventory
            .iter_mut()
            .find(|i| i.id == cmd.item_id)
            .ok_or_else(|| CommandError::NotFound { kind: "inventory item", id: cmd.item_id.clone() })?;

        item.quantity += cmd.quantity;
        Ok(Outcome::new(
            &item.id,
            format!("restocked {} {} to {} m", item.color, item.kind, item.quantity),
        ))
    }

    fn place_order(&mut self, cmd: &PlaceOrder) -> Result<Outcome, CommandError> {
        if self.orders.iter().any(|o| o.id == cmd.id) {
            return Err(CommandError::DuplicateId { kind: "order", id: cmd.id.clone() });
        }
        if self.customer(&cmd.customer_id).is_none() {
            return Err(CommandError::UnknownCustomer(cmd.customer_id.clone()));
        }
        self.orders.push(Order {
            id: cmd.id.clone(),
            customer_id: cmd.customer_id.clone(),
            status: OrderStatus::Pending,
            total: cmd.total,
            date: cmd.date,
        });
        Ok(Outcome::new(&cmd.id, format!("placed order {} for {}", cmd.id, cmd.total)))
    }

    fn update_order_status(&mut self, cmd: &UpdateOrderStatus) -> Result<Outcome, CommandError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == cmd.order_id)
            .ok_or_else(|| CommandError::NotFound { kind: "order", id: cmd.order_id.clone() })?;

        if order.status.is_terminal() {
            return Err(CommandError::TerminalStatus { id: order.id.clone(), status: order.status });
        }
        let previous = order.status;
        order.status = cmd.status;
        Ok(Outcome::new(
            &order.id,
            format!("order {} moved from {previous} to {}", order.id, order.status),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentStatus;
    use crate::seed::textile_factory;

    fn pay(invoice_id: &str, amount: f64) -> Command {
        Command::RecordPayment(RecordPayment { invoice_id: invoice_id.into(), amount })
    }

    #[test]
    fn payment_reduces_remaining() {
        let mut store = textile_factory();
        let outcome = store.apply(&pay("INV-2026-002", 5000.0)).unwrap();
        assert_eq!(outcome.entity_id, "INV-2026-002");

        let inv = store.invoices.iter().find(|i| i.id == "INV-2026-002").unwrap();
        assert_eq!(inv.amount_received, 8000.0);
        assert_eq!(inv.amount_remaining(), 10000.0);
        assert_eq!(inv.payment_status(), PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn full_payment_marks_paid() {
        let mut store = textile_factory();
        store.apply(&pay("INV-2026-005", 7600.0)).unwrap();
        let inv = store.invoices.iter().find(|i| i.id == "INV-2026-005").unwrap();
        assert_eq!(inv.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn overpayment_rejected_and_store_unchanged() {
        let mut store = textile_factory();
        let before = store.clone();
        let err = store.apply(&pay("INV-2026-002", 15000.01)).unwrap_err();
        assert!(matches!(err, CommandError::Overpayment { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn non_positive_amounts_rejected() {
        let mut store = textile_factory();
        assert_eq!(
            store.apply(&pay("INV-2026-002", 0.0)).unwrap_err(),
            CommandError::InvalidAmount { field: "amount", value: 0.0 }
        );
        assert!(store.apply(&pay("INV-2026-002", f64::NAN)).is_err());
    }

    #[test]
    fn unknown_invoice() {
        let mut store = textile_factory();
        let err = store.apply(&pay("INV-404", 10.0)).unwrap_err();
        assert_eq!(err.to_string(), "invoice 'INV-404' not found");
    }

    #[test]
    fn pay_employee_up_to_salary() {
        let mut store = textile_factory();
        let cmd = Command::PayEmployee(PayEmployee { employee_id: "E-004".into(), amount: 3000.0 });
        store.apply(&cmd).unwrap();
        let emp = store.employees.iter().find(|e| e.id == "E-004").unwrap();
        assert_eq!(emp.remaining(), 0.0);
        assert!(store.apply(&cmd).is_err());
    }

    #[test]
    fn restock_adds_quantity() {
        let mut store = textile_factory();
        let cmd = Command::Restock(Restock { item_id: "FAB-002".into(), quantity: 50.0 });
        store.apply(&cmd).unwrap();
        let item = store.inventory.iter().find(|i| i.id == "FAB-002").unwrap();
        assert_eq!(item.quantity, 130.0);
        assert!(!item.is_low_stock());
    }

    #[test]
    fn place_order_checks_customer_and_id() {
        let mut store = textile_factory();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let order = |id: &str, customer: &str| {
            Command::PlaceOrder(PlaceOrder { id: id.into(), customer_id: customer.into(), total: 4200.0, date })
        };

        store.apply(&order("ORD-009", "C-003")).unwrap();
        let placed = store.orders.last().unwrap();
        assert_eq!(placed.status, OrderStatus::Pending);

        assert_eq!(
            store.apply(&order("ORD-009", "C-003")).unwrap_err(),
            CommandError::DuplicateId { kind: "order", id: "ORD-009".into() }
        );
        assert_eq!(
            store.apply(&order("ORD-010", "C-999")).unwrap_err(),
            CommandError::UnknownCustomer("C-999".into())
        );
    }

    #[test]
    fn terminal_orders_do_not_move() {
        let mut store = textile_factory();
        let cmd = |id: &str, status| {
            Command::UpdateOrderStatus(UpdateOrderStatus { order_id: id.into(), status })
        };

        store.apply(&cmd("ORD-005", OrderStatus::Processing)).unwrap();
        store.apply(&cmd("ORD-005", OrderStatus::Completed)).unwrap();
        let err = store.apply(&cmd("ORD-005", OrderStatus::Pending)).unwrap_err();
        assert!(err.to_string().contains("already completed"));
    }

    #[test]
    fn commands_parse_from_tagged_json() {
        let json = r#"[
            {"command": "record_payment", "invoice_id": "INV-2026-002", "amount": 1000},
            {"command": "update_order_status", "order_id": "ORD-002", "status": "completed"}
        ]"#;
        let cmds: Vec<Command> = serde_json::from_str(json).unwrap();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0], pay("INV-2026-002", 1000.0));
    }
}
