use poise::serenity_prelude::{self as serenity, Context, EventHandler, GuildId, Ready};
use tracing::info;

pub struct Handler;

#[serenity::async_trait]
impl EventHandler for Handler {
    /// Called once the gateway session is up; the cache may still be
    /// filling.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            target: crate::EVENT_TARGET,
            bot = %ready.user.name,
            shard = %ctx.shard_id,
            "Connected to Discord"
        );
    }

    /// Called when the cache is fully populated.
    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        info!(
            target: crate::EVENT_TARGET,
            guilds = guilds.len(),
            "Cache ready, commands are live"
        );
    }
}
