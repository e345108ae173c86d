//! Delivery seam between the engine and the chat transport

use crate::dispenser::DispenseResult;

/// Hands a dispensed record to its user.
///
/// The engine only knows this capability; the Discord direct-message
/// implementation lives with the command glue.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DeliverySink: Send + Sync {
    /// Deliver one record to one user. Not retried on failure.
    async fn deliver(&self, user_id: u64, service: &str, record: &str) -> DispenseResult<()>;
}
