use std::fmt;

use crate::model::OrderStatus;

/// Rejection of a fixture document at the loading boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureError {
    /// JSON parse / deserialization error.
    Parse(String),
    /// IO error (file read, etc.).
    Io(String),
    /// Two entities of the same kind share an id.
    DuplicateId { kind: &'static str, id: String },
    /// An entity points at a customer that does not exist.
    UnknownReference { kind: &'static str, id: String, reference: String },
    /// Negative, non-finite or out-of-range amount.
    InvalidAmount { kind: &'static str, id: String, field: &'static str, value: f64 },
    /// Supplied derived invoice fields disagree with the amounts.
    InconsistentInvoice { id: String, detail: String },
    /// Date ordering violated (due before issue).
    InvalidDate { id: String, detail: String },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "fixture parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id '{id}'"),
            Self::UnknownReference { kind, id, reference } => {
                write!(f, "{kind} '{id}': unknown customer '{reference}'")
            }
            Self::InvalidAmount { kind, id, field, value } => {
                write!(f, "{kind} '{id}': invalid {field} {value}")
            }
            Self::InconsistentInvoice { id, detail } => write!(f, "invoice '{id}': {detail}"),
            Self::InvalidDate { id, detail } => write!(f, "invoice '{id}': {detail}"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Rejection of a typed command. The store is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    NotFound { kind: &'static str, id: String },
    /// Amount must be finite and strictly positive.
    InvalidAmount { field: &'static str, value: f64 },
    /// Payment larger than the open balance.
    Overpayment { id: String, amount: f64, remaining: f64 },
    DuplicateId { kind: &'static str, id: String },
    UnknownCustomer(String),
    /// Order already completed or cancelled.
    TerminalStatus { id: String, status: OrderStatus },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            Self::InvalidAmount { field, value } => {
                write!(f, "{field} must be a positive amount, got {value}")
            }
            Self::Overpayment { id, amount, remaining } => {
                write!(f, "'{id}': payment {amount} exceeds remaining balance {remaining}")
            }
            Self::DuplicateId { kind, id } => write!(f, "{kind} '{id}' already exists"),
            Self::UnknownCustomer(id) => write!(f, "unknown customer '{id}'"),
            Self::TerminalStatus { id, status } => {
                write!(f, "order '{id}' is already {status}")
            }
        }
    }
}

impl std::error::Error for CommandError {}
