pub mod commands;
pub mod config;
pub mod data;
pub mod delivery;
pub mod dispenser;
pub mod handlers;
pub mod logging;
pub mod responses;

// Customize these constants for your bot
pub const BOT_NAME: &str = "quartermaster";
pub const COMMAND_TARGET: &str = "quartermaster::command";
pub const DISPENSE_TARGET: &str = "quartermaster::dispense";
pub const ERROR_TARGET: &str = "quartermaster::error";
pub const EVENT_TARGET: &str = "quartermaster::handlers";

pub use config::BotConfig;
pub use data::{Data, DataInner};
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
