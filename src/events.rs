// Gateway event fan-out
// Messages feed the collectors, the publish pipeline and the reaction
// pipeline; component interactions go to the admin panel

use poise::serenity_prelude as serenity;

use crate::features::{collect, panel, publisher, reactions};
use crate::{Data, Error};

pub async fn handle(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            if let Some(component) = interaction.as_message_component() {
                panel::handle_component(ctx, component, data).await
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }

    // An awaited admin input is consumed first, but the same message still
    // runs through the pipelines below, exactly like any other message
    collect::try_fulfill(ctx, msg, data).await?;

    // The publish stage logs its own platform failures and cannot abort
    // the reaction stage behind it
    publisher::handle_message(ctx, msg, data).await;

    let config = data.store.snapshot().await;
    let selected = reactions::message_reactions(&config, msg.channel_id.get(), &msg.content);
    if !selected.is_empty() {
        reactions::apply_reactions(ctx, msg, &selected).await;
    }

    Ok(())
}
