use quartermaster::dispenser::{DeliverySink, DispenseResult, DispenserService, InventoryStore};
use std::sync::Arc;
use std::time::Duration;

/// Prints deliveries instead of sending them anywhere
struct ConsoleSink;

#[async_trait::async_trait]
impl DeliverySink for ConsoleSink {
    async fn deliver(&self, user_id: u64, service: &str, record: &str) -> DispenseResult<()> {
        println!("  -> delivered `{record}` ({service}) to user {user_id}");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    println!("Dispense Lifecycle Test");
    println!("-----------------------");

    // Seed a throwaway stock directory with two netflix accounts
    let stock_dir = std::env::temp_dir().join("quartermaster-demo-stock");
    tokio::fs::create_dir_all(&stock_dir)
        .await
        .expect("Failed to create the stock directory");
    tokio::fs::write(stock_dir.join("netflix.txt"), "user1:pass1\nuser2:pass2\n")
        .await
        .expect("Failed to seed stock");

    let dispenser = DispenserService::new(
        InventoryStore::new(&stock_dir),
        Duration::from_secs(2),
        Arc::new(ConsoleSink),
    );

    let alice = 1001;
    let bob = 1002;

    println!("\n--- Alice dispenses ---");
    match dispenser.dispense(alice, Some("netflix")).await {
        Ok(dispensed) => println!("Dispense {} succeeded", dispensed.id),
        Err(err) => println!("Unexpected failure: {err}"),
    }

    println!("\n--- Alice retries inside the cooldown window ---");
    match dispenser.dispense(alice, Some("netflix")).await {
        Ok(_) => println!("Unexpectedly dispensed again"),
        Err(err) => println!("Rejected: {err}"),
    }

    println!("\n--- Bob takes the last account ---");
    match dispenser.dispense(bob, Some("netflix")).await {
        Ok(dispensed) => println!("Dispense {} succeeded", dispensed.id),
        Err(err) => println!("Unexpected failure: {err}"),
    }

    println!("\n--- Sleeping past Alice's cooldown ---");
    tokio::time::sleep(Duration::from_secs(3)).await;

    println!("\n--- Alice is eligible again, but the shelf is bare ---");
    match dispenser.dispense(alice, Some("netflix")).await {
        Ok(_) => println!("Unexpectedly dispensed from empty stock"),
        Err(err) => println!("Rejected: {err}"),
    }

    println!("\n--- An unknown service is a different failure ---");
    match dispenser.dispense(bob, Some("hbo")).await {
        Ok(_) => println!("Unexpectedly dispensed"),
        Err(err) => println!("Rejected: {err}"),
    }

    println!("\nDispense lifecycle test completed successfully!");
}
