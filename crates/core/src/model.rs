use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Amounts below this are treated as zero when deriving status.
pub const AMOUNT_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    PartiallyPaid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
            Self::Unpaid => write!(f, "unpaid"),
            Self::PartiallyPaid => write!(f, "partially-paid"),
        }
    }
}

/// An issued invoice. The remaining balance is always derived from
/// `total - amount_received` and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: f64,
    pub amount_received: f64,
}

impl Invoice {
    pub fn amount_remaining(&self) -> f64 {
        self.total - self.amount_received
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.amount_remaining() <= AMOUNT_EPSILON {
            PaymentStatus::Paid
        } else if self.amount_received <= AMOUNT_EPSILON {
            PaymentStatus::Unpaid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }

    /// Past due with a balance still open, relative to `as_of`.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.due_date < as_of && self.amount_remaining() > AMOUNT_EPSILON
    }

    /// Whole days past the due date, or 0 when not yet due.
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.due_date).num_days().max(0)
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// A roll of fabric held in stock. `quantity` is in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    pub color: String,
    pub quantity: f64,
    #[serde(alias = "price")]
    pub unit_price: f64,
    #[serde(alias = "minimum")]
    pub min_threshold: f64,
}

impl InventoryItem {
    pub fn value(&self) -> f64 {
        self.quantity * self.unit_price
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_threshold
    }
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// Agreed salary for the period.
    pub salary: f64,
    /// Amount disbursed so far.
    pub paid: f64,
}

impl Employee {
    pub fn remaining(&self) -> f64 {
        self.salary - self.paid
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Completed and cancelled orders accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub total: f64,
    pub date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// What the supplier provides (yarn, dye, fabric, ...).
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub phone: String,
}

// ---------------------------------------------------------------------------
// Curated totals
// ---------------------------------------------------------------------------

/// Hand-maintained dashboard totals, kept separately from the entity data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTotals {
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}
