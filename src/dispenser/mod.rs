//! Stock dispensing engine
//!
//! This module owns the dispense flow: flat-file inventories keyed by
//! service name, the per-user cooldown set, and the orchestration that
//! takes exactly one record out of stock per request.

mod cooldown;
mod error;
mod inventory;
mod service;
mod sink;

pub use cooldown::CooldownRegistry;
pub use error::{DispenseError, DispenseResult};
pub use inventory::InventoryStore;
pub use service::{Dispensed, DispenserService};
pub use sink::DeliverySink;

#[cfg(test)]
pub use sink::MockDeliverySink;
