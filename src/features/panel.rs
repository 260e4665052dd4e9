// Button-driven admin panel
// Root panel opens from the .set command; every press lands here

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::features::collect::{self, InputTarget};
use crate::models::config::BotConfig;
use crate::utils::auth;
use crate::utils::config::ADMIN_ROLE_ID;
use crate::{Data, Error};

/// Every button the panel can show, parsed from the component custom id.
/// Unknown ids are ignored by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    ConfigureAnnouncement,
    ConfigurePing,
    ConfigureImage,
    ConfigureReactions,
    ToggleBot,
    TogglePing,
    ChangePingRole,
    ToggleImageUrl,
    ChangeImageUrl,
    ChangeAnnouncementChannel,
    AddDeniedReaction,
    ResetDeniedReactions,
    AddFixedReaction,
    ResetFixedReactions,
    ToggleReactions,
}

impl PanelAction {
    pub fn from_id(id: &str) -> Option<Self> {
        let action = match id {
            "configure-announcement" => Self::ConfigureAnnouncement,
            "configure-ping" => Self::ConfigurePing,
            "configure-image" => Self::ConfigureImage,
            "configure-reactions" => Self::ConfigureReactions,
            "toggle-bot" => Self::ToggleBot,
            "toggle-ping" => Self::TogglePing,
            "change-ping-role" => Self::ChangePingRole,
            "toggle-image-url" => Self::ToggleImageUrl,
            "change-image-url" => Self::ChangeImageUrl,
            "change-announcement-channel" => Self::ChangeAnnouncementChannel,
            "add-denied-reaction" => Self::AddDeniedReaction,
            "reset-denied-reactions" => Self::ResetDeniedReactions,
            "add-fixed-reaction" => Self::AddFixedReaction,
            "reset-fixed-reactions" => Self::ResetFixedReactions,
            "toggle-reactions" => Self::ToggleReactions,
            _ => return None,
        };
        Some(action)
    }
}

/// On/off toggle button with swapped label and color
fn toggle_button(id: &str, what: &str, enabled: bool) -> serenity::CreateButton {
    let (label, style) = if enabled {
        (format!("Turn {what} Off"), serenity::ButtonStyle::Danger)
    } else {
        (format!("Turn {what} On"), serenity::ButtonStyle::Success)
    };
    serenity::CreateButton::new(id).label(label).style(style)
}

fn primary_button(id: &str, label: &str) -> serenity::CreateButton {
    serenity::CreateButton::new(id)
        .label(label)
        .style(serenity::ButtonStyle::Primary)
}

fn danger_button(id: &str, label: &str) -> serenity::CreateButton {
    serenity::CreateButton::new(id)
        .label(label)
        .style(serenity::ButtonStyle::Danger)
}

/// Root panel: the four category buttons plus the master switch
pub fn root_panel(config: &BotConfig) -> Vec<serenity::CreateActionRow> {
    vec![
        serenity::CreateActionRow::Buttons(vec![
            primary_button("configure-announcement", "Configure Announcement Channel"),
            primary_button("configure-ping", "Configure Ping"),
            primary_button("configure-image", "Configure Image URL"),
        ]),
        serenity::CreateActionRow::Buttons(vec![
            primary_button("configure-reactions", "Configure Reactions"),
            toggle_button("toggle-bot", "Bot", config.bot_enabled),
        ]),
    ]
}

pub fn announcement_panel(_config: &BotConfig) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![primary_button(
        "change-announcement-channel",
        "Change Announcement Channel",
    )])]
}

pub fn ping_panel(config: &BotConfig) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        toggle_button("toggle-ping", "Ping", config.ping_enabled),
        primary_button("change-ping-role", "Change Ping Role"),
    ])]
}

pub fn image_panel(config: &BotConfig) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        toggle_button("toggle-image-url", "Image URL", config.image_url_enabled),
        primary_button("change-image-url", "Change Image URL"),
    ])]
}

pub fn reactions_panel(config: &BotConfig) -> Vec<serenity::CreateActionRow> {
    vec![serenity::CreateActionRow::Buttons(vec![
        primary_button("add-denied-reaction", "Add Denied Reaction"),
        danger_button("reset-denied-reactions", "Reset Denied Reactions"),
        primary_button("add-fixed-reaction", "Add Fixed Reaction"),
        danger_button("reset-fixed-reactions", "Reset Fixed Reactions"),
        toggle_button("toggle-reactions", "Reactions", config.reactions_enabled),
    ])]
}

/// Handle one button press on any panel
pub async fn handle_component(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(action) = PanelAction::from_id(&interaction.data.custom_id) else {
        return Ok(());
    };

    let roles = interaction
        .member
        .as_ref()
        .map(|m| m.roles.as_slice())
        .unwrap_or(&[]);
    if !auth::is_authorized(roles, serenity::RoleId::new(ADMIN_ROLE_ID)) {
        // Not an error: just a member poking at an admin panel
        ephemeral_reply(ctx, interaction, "You don't have permission to use this button.").await?;
        return Ok(());
    }

    match action {
        PanelAction::ConfigureAnnouncement => {
            let config = data.store.snapshot().await;
            open_sub_panel(
                ctx,
                interaction,
                "Announcement channel configuration:",
                announcement_panel(&config),
            )
            .await
        }
        PanelAction::ConfigurePing => {
            let config = data.store.snapshot().await;
            open_sub_panel(ctx, interaction, "Ping configuration:", ping_panel(&config)).await
        }
        PanelAction::ConfigureImage => {
            let config = data.store.snapshot().await;
            open_sub_panel(
                ctx,
                interaction,
                "Image URL configuration:",
                image_panel(&config),
            )
            .await
        }
        PanelAction::ConfigureReactions => {
            let config = data.store.snapshot().await;
            open_sub_panel(
                ctx,
                interaction,
                "Reaction configuration:",
                reactions_panel(&config),
            )
            .await
        }
        PanelAction::ToggleBot => {
            let config = data.store.update(|c| c.bot_enabled = !c.bot_enabled).await?;
            info!("Bot toggled to {}", config.bot_enabled);
            let content = if config.bot_enabled {
                "Bot turned on."
            } else {
                "Bot turned off."
            };
            update_panel(ctx, interaction, content, root_panel(&config)).await
        }
        PanelAction::TogglePing => {
            let config = data
                .store
                .update(|c| c.ping_enabled = !c.ping_enabled)
                .await?;
            let content = if config.ping_enabled {
                "Ping turned on."
            } else {
                "Ping turned off."
            };
            update_panel(ctx, interaction, content, ping_panel(&config)).await
        }
        PanelAction::ToggleImageUrl => {
            let config = data
                .store
                .update(|c| c.image_url_enabled = !c.image_url_enabled)
                .await?;
            let content = if config.image_url_enabled {
                "Image URL turned on."
            } else {
                "Image URL turned off."
            };
            update_panel(ctx, interaction, content, image_panel(&config)).await
        }
        PanelAction::ToggleReactions => {
            let config = data
                .store
                .update(|c| c.reactions_enabled = !c.reactions_enabled)
                .await?;
            let content = if config.reactions_enabled {
                "Reactions turned on."
            } else {
                "Reactions turned off."
            };
            update_panel(ctx, interaction, content, reactions_panel(&config)).await
        }
        PanelAction::ResetDeniedReactions => {
            let config = data.store.update(|c| c.denied_reactions.clear()).await?;
            update_panel(
                ctx,
                interaction,
                "All denied reactions cleared.",
                reactions_panel(&config),
            )
            .await
        }
        PanelAction::ResetFixedReactions => {
            let config = data.store.update(|c| c.fixed_reactions.clear()).await?;
            update_panel(
                ctx,
                interaction,
                "All fixed reactions cleared.",
                reactions_panel(&config),
            )
            .await
        }
        PanelAction::ChangeAnnouncementChannel => {
            prompt_for_input(ctx, interaction, data, InputTarget::AnnouncementChannel).await
        }
        PanelAction::ChangePingRole => {
            prompt_for_input(ctx, interaction, data, InputTarget::PingRole).await
        }
        PanelAction::ChangeImageUrl => {
            prompt_for_input(ctx, interaction, data, InputTarget::ImageUrl).await
        }
        PanelAction::AddDeniedReaction => {
            prompt_for_input(ctx, interaction, data, InputTarget::DeniedReaction).await
        }
        PanelAction::AddFixedReaction => {
            prompt_for_input(ctx, interaction, data, InputTarget::FixedReaction).await
        }
    }
}

/// Ephemeral text-only reply to a button press
async fn ephemeral_reply(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

/// Open a sub-panel as an ephemeral reply so only the admin sees it
async fn open_sub_panel(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: &str,
    components: Vec<serenity::CreateActionRow>,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(components)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

/// Re-render the pressed panel in place with refreshed button state.
/// The config is persisted before this runs, so the UI never shows a
/// state that is not already on disk.
async fn update_panel(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: &str,
    components: Vec<serenity::CreateActionRow>,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(components),
            ),
        )
        .await?;
    Ok(())
}

/// Prompt for a value and register the one-shot collector for it
async fn prompt_for_input(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
    target: InputTarget,
) -> Result<(), Error> {
    ephemeral_reply(ctx, interaction, target.prompt()).await?;
    collect::register(data, interaction, target);
    Ok(())
}
