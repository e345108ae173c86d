//! Dispense orchestration
//!
//! Validates the request, gates on the cooldown, takes a record out of
//! stock, and only then lets the user hear about it.

use crate::dispenser::{
    CooldownRegistry, DeliverySink, DispenseError, DispenseResult, InventoryStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// A record successfully taken out of stock
#[derive(Debug, Clone)]
pub struct Dispensed {
    /// Unique id of this dispense, for the logs
    pub id: String,
    /// Service the record came from
    pub service: String,
    /// The record itself
    pub record: String,
}

/// Wires the inventory, the cooldown registry, and the delivery sink
/// into the dispense flow
#[derive(Clone)]
pub struct DispenserService {
    inventory: InventoryStore,
    cooldowns: CooldownRegistry,
    cooldown: Duration,
    sink: Arc<dyn DeliverySink>,
}

impl DispenserService {
    /// Create a dispenser over an inventory with a fixed cooldown window.
    #[must_use]
    pub fn new(inventory: InventoryStore, cooldown: Duration, sink: Arc<dyn DeliverySink>) -> Self {
        Self {
            inventory,
            cooldowns: CooldownRegistry::new(),
            cooldown,
            sink,
        }
    }

    /// The inventory behind this dispenser.
    #[must_use]
    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    /// Whether a user is currently barred from dispensing.
    #[must_use]
    pub fn is_on_cooldown(&self, user_id: u64) -> bool {
        self.cooldowns.is_on_cooldown(user_id)
    }

    /// Dispense one record of `service` to `user_id`.
    ///
    /// The record is removed from stock and the remainder persisted
    /// before anything reaches the user; the cooldown starts once the
    /// persist is confirmed, whether or not the delivery went through.
    ///
    /// # Errors
    ///
    /// Any variant of [`DispenseError`]. None of them leave stock in a
    /// half-written state, and only `Delivery` consumes a record.
    pub async fn dispense(
        &self,
        user_id: u64,
        service: Option<&str>,
    ) -> DispenseResult<Dispensed> {
        let Some(service) = service else {
            return Err(DispenseError::MissingService);
        };

        if self.cooldowns.is_on_cooldown(user_id) {
            return Err(DispenseError::OnCooldown(user_id));
        }

        let record = match self.inventory.pop_first(service).await {
            Ok(record) => record,
            Err(err) => {
                if matches!(err, DispenseError::Persist { .. }) {
                    warn!(
                        target: crate::DISPENSE_TARGET,
                        user_id,
                        service,
                        error = %err,
                        "Stock rewrite failed, nothing dispensed"
                    );
                }
                return Err(err);
            }
        };
        let dispensed = Dispensed {
            id: Uuid::new_v4().to_string(),
            service: service.to_owned(),
            record,
        };
        info!(
            target: crate::DISPENSE_TARGET,
            dispense_id = %dispensed.id,
            user_id,
            service,
            "Record taken from stock"
        );

        let delivery = self.sink.deliver(user_id, service, &dispensed.record).await;

        // The record is gone from stock either way, so the window starts
        // now; a failed message must not grant another pull.
        self.cooldowns.start(user_id, self.cooldown);

        if let Err(err) = delivery {
            warn!(
                target: crate::DISPENSE_TARGET,
                dispense_id = %dispensed.id,
                user_id,
                service,
                error = %err,
                "Record taken but delivery failed"
            );
            return Err(err);
        }

        info!(
            target: crate::DISPENSE_TARGET,
            dispense_id = %dispensed.id,
            user_id,
            service,
            "Record delivered"
        );
        Ok(dispensed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispenser::MockDeliverySink;
    use tempfile::TempDir;

    const COOLDOWN: Duration = Duration::from_secs(60);

    async fn seed(dir: &TempDir, service: &str, content: &str) {
        tokio::fs::write(dir.path().join(format!("{service}.txt")), content)
            .await
            .unwrap();
    }

    async fn stock_content(dir: &TempDir, service: &str) -> String {
        tokio::fs::read_to_string(dir.path().join(format!("{service}.txt")))
            .await
            .unwrap()
    }

    fn dispenser(dir: &TempDir, sink: MockDeliverySink) -> DispenserService {
        DispenserService::new(InventoryStore::new(dir.path()), COOLDOWN, Arc::new(sink))
    }

    fn delivering_sink(times: usize) -> MockDeliverySink {
        let mut sink = MockDeliverySink::new();
        sink.expect_deliver().times(times).returning(|_, _, _| Ok(()));
        sink
    }

    #[tokio::test]
    async fn test_refuses_a_request_without_a_service_name() {
        let dir = TempDir::new().unwrap();
        let dispenser = dispenser(&dir, delivering_sink(0));

        assert!(matches!(
            dispenser.dispense(1, None).await,
            Err(DispenseError::MissingService)
        ));
        assert!(!dispenser.is_on_cooldown(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_starts_the_cooldown_and_blocks_the_next_pull() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "netflix", "user1:pass1\nuser2:pass2\n").await;
        let dispenser = dispenser(&dir, delivering_sink(2));

        let first = dispenser.dispense(1, Some("netflix")).await.unwrap();
        assert_eq!(first.record, "user1:pass1");
        assert_eq!(first.service, "netflix");
        assert!(dispenser.is_on_cooldown(1));

        // The retry is rejected and leaves stock alone.
        assert!(matches!(
            dispenser.dispense(1, Some("netflix")).await,
            Err(DispenseError::OnCooldown(1))
        ));
        assert_eq!(stock_content(&dir, "netflix").await, "user2:pass2\n");

        // A different user is unaffected.
        let second = dispenser.dispense(2, Some("netflix")).await.unwrap();
        assert_eq!(second.record, "user2:pass2");

        tokio::time::sleep(COOLDOWN + Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(!dispenser.is_on_cooldown(1));
    }

    #[tokio::test]
    async fn test_delivery_happens_only_after_the_persist_is_confirmed() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "netflix", "user1:pass1\nuser2:pass2\n").await;

        let stock_file = dir.path().join("netflix.txt");
        let mut sink = MockDeliverySink::new();
        sink.expect_deliver().times(1).returning(move |_, _, record| {
            // By delivery time the dispensed line is already off disk.
            let remaining = std::fs::read_to_string(&stock_file).unwrap();
            assert!(!remaining.contains(record));
            Ok(())
        });

        let dispenser = dispenser(&dir, sink);
        dispenser.dispense(1, Some("netflix")).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_delivery_still_burns_the_record_and_the_cooldown() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "netflix", "user1:pass1\n").await;

        let mut sink = MockDeliverySink::new();
        sink.expect_deliver().times(1).returning(|user_id, _, _| {
            Err(DispenseError::Delivery {
                user_id,
                source: Box::new(std::io::Error::other("dms closed")),
            })
        });

        let dispenser = dispenser(&dir, sink);
        assert!(matches!(
            dispenser.dispense(1, Some("netflix")).await,
            Err(DispenseError::Delivery { user_id: 1, .. })
        ));
        assert_eq!(stock_content(&dir, "netflix").await, "");
        assert!(dispenser.is_on_cooldown(1));
    }

    #[tokio::test]
    async fn test_stock_failures_never_start_a_cooldown() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "empty", "").await;
        let dispenser = dispenser(&dir, delivering_sink(0));

        assert!(matches!(
            dispenser.dispense(1, Some("nosuch")).await,
            Err(DispenseError::NotFound(_))
        ));
        assert!(matches!(
            dispenser.dispense(1, Some("empty")).await,
            Err(DispenseError::Empty(_))
        ));
        assert!(!dispenser.is_on_cooldown(1));
    }
}
