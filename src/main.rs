use std::env;
use std::sync::Arc;

use poise::serenity_prelude::{self as serenity};
use serenity::GatewayIntents;
use tracing::info;

use quartermaster::delivery::DirectMessageSink;
use quartermaster::dispenser::{DispenserService, InventoryStore};
use quartermaster::{BotConfig, Data, Error, commands, handlers, logging};

/// Main function to run the bot
async fn async_main() -> Result<(), Error> {
    // Initialize logging
    logging::init()?;

    // Load environment variables and configuration
    let token = env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set");
    let config = BotConfig::load().await;

    // Configure the Poise framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::r#gen(), commands::stock()],
            pre_command: |ctx| {
                Box::pin(async move {
                    logging::log_command_start(ctx);
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    logging::log_command_end(ctx);
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    logging::log_command_error(&error);
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                // The delivery sink needs the gateway's HTTP client, so
                // the engine is wired up here rather than before connect
                let sink = DirectMessageSink::new(Arc::clone(&ctx.http), config.success_color);
                let dispenser = DispenserService::new(
                    InventoryStore::new(config.stock_dir.clone()),
                    config.cooldown(),
                    Arc::new(sink),
                );
                Ok(Data::new(config, dispenser))
            })
        })
        .build();

    // Configure the Serenity client
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
    let mut client = serenity::ClientBuilder::new(token, intents)
        .event_handler(handlers::Handler)
        .framework(framework)
        .await
        .expect("Failed to create client");

    info!("Starting {}", quartermaster::BOT_NAME);
    if let Err(err) = client.start().await {
        eprintln!("Error starting the bot: {err}");
    }

    Ok(())
}

fn main() {
    // Run the async main function
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build the async runtime")
        .block_on(async_main());

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }
}
