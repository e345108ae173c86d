use crate::{Context, Error, responses};
use poise::CreateReply;
use poise::serenity_prelude as serenity;
use std::fmt::Write as _;
use tracing::error;

fn outcome_embed(color: u32, title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .color(color)
        .title(title)
        .description(description)
        .timestamp(serenity::Timestamp::now())
}

async fn send_embed(ctx: Context<'_>, embed: serenity::CreateEmbed) -> Result<(), Error> {
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Generate an account for a stocked service.
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn r#gen(
    ctx: Context<'_>,
    #[description = "Service to generate an account for"] service: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();
    let config = &data.config;

    // The generator channel must exist before anything is dispensed.
    let configured = config.gen_channel_id.filter(|&id| id != 0);
    let gen_channel = match configured {
        Some(id)
            if ctx
                .serenity_context()
                .cache
                .channel(serenity::ChannelId::new(id))
                .is_some() =>
        {
            serenity::ChannelId::new(id)
        }
        _ => {
            error!(
                target: crate::ERROR_TARGET,
                configured = ?configured,
                "Generator channel missing or unknown"
            );
            if config.send_error_messages {
                let (title, description) = responses::invalid_channel_response();
                send_embed(ctx, outcome_embed(config.error_color, &title, &description)).await?;
            }
            return Ok(());
        }
    };

    if ctx.channel_id() != gen_channel {
        let (title, description) = responses::wrong_channel_response(gen_channel.get());
        return send_embed(ctx, outcome_embed(config.error_color, &title, &description)).await;
    }

    let user_id = ctx.author().id.get();
    match data.dispenser.dispense(user_id, service.as_deref()).await {
        Ok(_) => {
            let (title, description) = responses::success_response(user_id);
            send_embed(
                ctx,
                outcome_embed(config.success_color, &title, &description),
            )
            .await
        }
        Err(err) => {
            let (title, description) = responses::error_response(&err);
            send_embed(ctx, outcome_embed(config.error_color, &title, &description)).await
        }
    }
}

/// Show how many accounts are left for each stocked service.
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn stock(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let inventory = data.dispenser.inventory();

    let mut overview = String::new();
    for name in inventory.service_names() {
        let count = inventory.record_count(&name).await.unwrap_or(0);
        let _ = writeln!(overview, "`{name}`: {count} account(s)");
    }
    if overview.is_empty() {
        overview = "Nothing is stocked right now.".to_string();
    }

    send_embed(
        ctx,
        outcome_embed(data.config.success_color, "Current stock", &overview),
    )
    .await
}
