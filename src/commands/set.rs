// .set command - opens the admin control panel

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::features::panel;
use crate::utils::auth;
use crate::utils::config::ADMIN_ROLE_ID;
use crate::{Context, Error};

/// Open the bot control panel
#[poise::command(prefix_command, guild_only, hide_in_help)]
pub async fn set(
    ctx: Context<'_>,
    // Tolerate trailing text after ".set"
    #[rest] _rest: Option<String>,
) -> Result<(), Error> {
    let authorized = match ctx.author_member().await {
        Some(member) => auth::is_authorized(&member.roles, serenity::RoleId::new(ADMIN_ROLE_ID)),
        None => false,
    };
    if !authorized {
        ctx.send(
            poise::CreateReply::default()
                .content("You don't have permission to use this command.")
                .reply(true),
        )
        .await?;
        return Ok(());
    }

    let config = ctx.data().store.snapshot().await;
    ctx.channel_id()
        .send_message(
            ctx.http(),
            serenity::CreateMessage::new()
                .content("Bot control panel:")
                .components(panel::root_panel(&config)),
        )
        .await?;
    info!("Control panel opened by {}", ctx.author().id);

    Ok(())
}
