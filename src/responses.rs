//! User-facing response text
//!
//! Maps every dispense outcome to the title and description the embeds
//! render, in one place so the commands stay thin.

use crate::dispenser::DispenseError;

/// Embed title and description for a rejected or failed dispense.
#[must_use]
pub fn error_response(error: &DispenseError) -> (String, String) {
    match error {
        DispenseError::MissingService => (
            "Missing parameters!".to_string(),
            "You need to give a service name!".to_string(),
        ),
        DispenseError::OnCooldown(_) => (
            "Cooldown!".to_string(),
            "Please wait before executing that command again!".to_string(),
        ),
        DispenseError::NotFound(service) => (
            "Generator error!".to_string(),
            format!("Service `{service}` does not exist!"),
        ),
        DispenseError::Empty(service) => (
            "Generator error!".to_string(),
            format!("The `{service}` service is empty!"),
        ),
        DispenseError::Persist { service, .. } => (
            "Generator error!".to_string(),
            format!("Could not update the `{service}` stock, so nothing was dispensed. Try again!"),
        ),
        DispenseError::Delivery { .. } => (
            "Delivery failed!".to_string(),
            "An account was set aside for you but the private message did not go through. \
             Please unlock your private messages!"
                .to_string(),
        ),
    }
}

/// Channel confirmation once a dispense fully succeeded.
#[must_use]
pub fn success_response(user_id: u64) -> (String, String) {
    (
        "Account generated successfully!".to_string(),
        format!(
            "Check your private messages, <@{user_id}>! \
             *If you did not receive the message, please unlock your private messages!*"
        ),
    )
}

/// Redirect for a `gen` attempted outside the generator channel.
#[must_use]
pub fn wrong_channel_response(gen_channel_id: u64) -> (String, String) {
    (
        "Wrong command usage!".to_string(),
        format!("You cannot use the `gen` command in this channel! Try it in <#{gen_channel_id}>!"),
    )
}

/// Shown when no usable generator channel is configured.
#[must_use]
pub fn invalid_channel_response() -> (String, String) {
    (
        "Error occurred!".to_string(),
        "Not a valid gen channel specified!".to_string(),
    )
}
