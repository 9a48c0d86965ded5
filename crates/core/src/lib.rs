//! `loomledger-core`: factory entities and the fixture store.
//!
//! Owns the data model, loading/validation of fixture documents, the built-in
//! seed dataset and typed commands. No reporting logic lives here.

pub mod command;
pub mod error;
pub mod model;
pub mod seed;
pub mod store;

pub use command::{Command, Outcome};
pub use error::{CommandError, FixtureError};
pub use model::{
    Customer, Employee, InventoryItem, Invoice, Order, OrderStatus, PaymentStatus,
    ReferenceTotals, Supplier,
};
pub use store::{FixtureDocument, FixtureStore};
