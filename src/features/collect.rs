// One-shot input collection for the admin panel
// "Press a button, then the next message you send becomes the new value"

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::models::config::BotConfig;
use crate::utils::store::StoreError;
use crate::Data;

/// Configuration field an awaited message is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    AnnouncementChannel,
    PingRole,
    ImageUrl,
    DeniedReaction,
    FixedReaction,
}

impl InputTarget {
    /// Ephemeral prompt shown when the collector is opened
    pub fn prompt(self) -> &'static str {
        match self {
            Self::AnnouncementChannel => "Send the ID of the new announcement channel.",
            Self::PingRole => "Send the new role ID to ping.",
            Self::ImageUrl => "Send the new image URL.",
            Self::DeniedReaction => "Send the reaction you want to deny.",
            Self::FixedReaction => "Send the fixed reaction you want to add.",
        }
    }

    /// Ephemeral confirmation sent after the value is stored
    pub fn confirmation(self, value: &str) -> String {
        match self {
            Self::AnnouncementChannel => format!("Announcement channel updated to: {value}"),
            Self::PingRole => format!("Ping role updated to: {value}"),
            Self::ImageUrl => format!("Image URL updated to: {value}"),
            Self::DeniedReaction => format!("Denied reaction added: {value}"),
            Self::FixedReaction => format!("Fixed reaction added: {value}"),
        }
    }

    /// Write the collected value into the record. String-typed fields are
    /// overwritten, list-typed fields are appended to. The value is taken
    /// verbatim; a bogus ID only surfaces later as a failed platform call.
    pub fn apply(self, config: &mut BotConfig, value: &str) {
        match self {
            Self::AnnouncementChannel => {
                config.announcement_channel_id = Some(value.to_string());
            }
            Self::PingRole => config.ping_role_id = Some(value.to_string()),
            Self::ImageUrl => config.image_url = Some(value.to_string()),
            Self::DeniedReaction => config.denied_reactions.push(value.to_string()),
            Self::FixedReaction => config.fixed_reactions.push(value.to_string()),
        }
    }
}

/// A registered collector: which field to fill, plus the interaction that
/// opened it so the confirmation can go out as an ephemeral follow-up.
#[derive(Debug)]
pub struct PendingInput {
    pub target: InputTarget,
    pub interaction: serenity::ComponentInteraction,
}

/// Active collectors keyed by (channel, actor). One per key; registering a
/// second prompt for the same key replaces the first. Entries have no
/// timeout: a prompt nobody answers stays registered until it is replaced.
pub type PendingInputs = DashMap<(serenity::ChannelId, serenity::UserId), PendingInput>;

/// Register a collector for the actor who pressed the button
pub fn register(data: &Data, interaction: &serenity::ComponentInteraction, target: InputTarget) {
    data.pending.insert(
        (interaction.channel_id, interaction.user.id),
        PendingInput {
            target,
            interaction: interaction.clone(),
        },
    );
}

/// Consume a pending collector with this message, if one matches its
/// (channel, author) key. Returns true when the message was consumed.
/// The message still flows through the publish and reaction pipelines.
pub async fn try_fulfill(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<bool, StoreError> {
    let Some((_, pending)) = data.pending.remove(&(msg.channel_id, msg.author.id)) else {
        return Ok(false);
    };

    let value = msg.content.clone();
    data.store
        .update(|config| pending.target.apply(config, &value))
        .await?;
    info!("Collected {:?} input from {}", pending.target, msg.author.id);

    let followup = serenity::CreateInteractionResponseFollowup::new()
        .content(pending.target.confirmation(&value))
        .ephemeral(true);
    if let Err(e) = pending.interaction.create_followup(&ctx.http, followup).await {
        // Token may have expired; the value is already stored either way
        warn!("Failed to confirm collected input: {:?}", e);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_targets_overwrite() {
        let mut config = BotConfig::default();
        InputTarget::AnnouncementChannel.apply(&mut config, "111");
        InputTarget::AnnouncementChannel.apply(&mut config, "222");
        assert_eq!(config.announcement_channel_id.as_deref(), Some("222"));

        InputTarget::PingRole.apply(&mut config, "333");
        InputTarget::ImageUrl.apply(&mut config, "https://example.com/a.png");
        assert_eq!(config.ping_role_id.as_deref(), Some("333"));
        assert_eq!(config.image_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn list_targets_append_without_replacing() {
        let mut config = BotConfig::default();
        InputTarget::DeniedReaction.apply(&mut config, "😀");
        InputTarget::DeniedReaction.apply(&mut config, "🔥");
        assert_eq!(config.denied_reactions, vec!["😀", "🔥"]);

        InputTarget::FixedReaction.apply(&mut config, "✅");
        InputTarget::FixedReaction.apply(&mut config, "✅");
        assert_eq!(config.fixed_reactions, vec!["✅", "✅"]);
    }

    #[test]
    fn values_are_stored_verbatim() {
        // No shape validation: junk is accepted and only fails later in use
        let mut config = BotConfig::default();
        InputTarget::AnnouncementChannel.apply(&mut config, "not a channel id");
        assert_eq!(
            config.announcement_channel_id.as_deref(),
            Some("not a channel id")
        );
    }
}
