//! Discord delivery of dispensed records
//!
//! The production [`DeliverySink`]: the record goes to the user as a
//! direct-message embed, never into the channel the command came from.

use crate::dispenser::{DeliverySink, DispenseError, DispenseResult};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

/// Sends dispensed records to users as direct-message embeds
pub struct DirectMessageSink {
    http: Arc<serenity::Http>,
    /// Embed colour for the account message
    color: u32,
}

impl DirectMessageSink {
    #[must_use]
    pub fn new(http: Arc<serenity::Http>, color: u32) -> Self {
        Self { http, color }
    }

    fn account_embed(&self, service: &str, record: &str) -> serenity::CreateEmbed {
        serenity::CreateEmbed::new()
            .color(self.color)
            .title("Account generated")
            .field("Service", format!("`{}`", display_name(service)), true)
            .field("Account", format!("`{record}`"), true)
            .timestamp(serenity::Timestamp::now())
    }
}

#[async_trait::async_trait]
impl DeliverySink for DirectMessageSink {
    async fn deliver(&self, user_id: u64, service: &str, record: &str) -> DispenseResult<()> {
        let message = serenity::CreateMessage::new().embed(self.account_embed(service, record));

        let channel = serenity::UserId::new(user_id)
            .create_dm_channel(&self.http)
            .await
            .map_err(|err| DispenseError::Delivery {
                user_id,
                source: Box::new(err),
            })?;

        channel
            .id
            .send_message(&self.http, message)
            .await
            .map_err(|err| DispenseError::Delivery {
                user_id,
                source: Box::new(err),
            })?;

        debug!(target: crate::DISPENSE_TARGET, user_id, service, "Direct message sent");
        Ok(())
    }
}

/// Service names display with a leading capital, however they were typed.
fn display_name(service: &str) -> String {
    let mut chars = service.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
