//! Shared bot state

use crate::config::BotConfig;
use crate::dispenser::DispenserService;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Centralized data structure for the bot
#[derive(Clone)]
pub struct Data(pub Arc<DataInner>);

/// State shared by every command invocation
pub struct DataInner {
    /// Loaded configuration
    pub config: BotConfig,
    /// The dispensing engine
    pub dispenser: DispenserService,
}

impl Data {
    /// Bundle the configuration and the engine for the framework.
    #[must_use]
    pub fn new(config: BotConfig, dispenser: DispenserService) -> Self {
        Self(Arc::new(DataInner { config, dispenser }))
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("config", &self.0.config)
            .finish_non_exhaustive()
    }
}

impl Deref for Data {
    type Target = DataInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
