//! Error types for the dispensing engine
//!
//! Every variant is recoverable at the request boundary; none of them
//! take the process down.

use thiserror::Error;

/// Errors that can occur while dispensing stock
#[derive(Debug, Error)]
pub enum DispenseError {
    /// The request carried no service name
    #[error("No service name given")]
    MissingService,

    /// The user dispensed recently and is still cooling down
    #[error("User {0} is on cooldown")]
    OnCooldown(u64),

    /// No stock file exists for the service
    #[error("Service not stocked: {0}")]
    NotFound(String),

    /// The stock file exists but holds no records
    #[error("Service out of stock: {0}")]
    Empty(String),

    /// The stock file could not be rewritten after taking a record
    #[error("Failed to persist stock for {service}: {source}")]
    Persist {
        service: String,
        #[source]
        source: std::io::Error,
    },

    /// A record was taken but could not be handed to the user
    #[error("Failed to deliver to user {user_id}: {source}")]
    Delivery {
        user_id: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for dispensing operations
pub type DispenseResult<T> = Result<T, DispenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DispenseError::MissingService;
        assert_eq!(error.to_string(), "No service name given");

        let error = DispenseError::OnCooldown(42);
        assert_eq!(error.to_string(), "User 42 is on cooldown");

        let error = DispenseError::NotFound("netflix".to_string());
        assert_eq!(error.to_string(), "Service not stocked: netflix");

        let error = DispenseError::Empty("spotify".to_string());
        assert_eq!(error.to_string(), "Service out of stock: spotify");
    }

    #[test]
    fn test_persist_error_keeps_the_cause() {
        let error = DispenseError::Persist {
            service: "netflix".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert!(error.to_string().contains("netflix"));
        assert!(error.to_string().contains("disk full"));
    }
}
