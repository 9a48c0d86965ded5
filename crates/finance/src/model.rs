use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Financial summary
// ---------------------------------------------------------------------------

/// One point of the trailing monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    /// Short display label, e.g. `Oct 2026`.
    pub label: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    /// True when `revenue` is a fallback estimate rather than invoiced money.
    pub revenue_estimated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ExpenseCategory {
    Labor,
    #[serde(rename = "Raw Materials")]
    RawMaterials,
    Utilities,
    #[serde(rename = "Equipment & Maintenance")]
    EquipmentMaintenance,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Labor,
        ExpenseCategory::RawMaterials,
        ExpenseCategory::Utilities,
        ExpenseCategory::EquipmentMaintenance,
        ExpenseCategory::Miscellaneous,
    ];
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Labor => write!(f, "Labor"),
            Self::RawMaterials => write!(f, "Raw Materials"),
            Self::Utilities => write!(f, "Utilities"),
            Self::EquipmentMaintenance => write!(f, "Equipment & Maintenance"),
            Self::Miscellaneous => write!(f, "Miscellaneous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseLine {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub percentage: f64,
}

/// Derived on every call; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub as_of: NaiveDate,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub monthly_data: Vec<MonthlyPoint>,
    pub expense_breakdown: Vec<ExpenseLine>,
    pub outstanding_payments: f64,
    pub overdue_amount: f64,
    pub overdue_count: usize,
}

// ---------------------------------------------------------------------------
// Consistency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Expenses,
    Profit,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revenue => write!(f, "revenue"),
            Self::Expenses => write!(f, "expenses"),
            Self::Profit => write!(f, "profit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCheck {
    pub metric: Metric,
    pub computed: f64,
    pub reference: f64,
    /// `computed - reference`
    pub difference: f64,
    pub matches: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyStatus {
    Consistent,
    Inconsistent,
}

impl std::fmt::Display for ConsistencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consistent => write!(f, "consistent"),
            Self::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub checks: Vec<MetricCheck>,
    /// Percentage of matching metrics, one decimal place.
    pub score: f64,
    pub issues: Vec<String>,
    pub status: ConsistencyStatus,
}

impl ConsistencyReport {
    pub fn check(&self, metric: Metric) -> Option<&MetricCheck> {
        self.checks.iter().find(|c| c.metric == metric)
    }

    pub fn is_consistent(&self) -> bool {
        self.status == ConsistencyStatus::Consistent
    }
}
