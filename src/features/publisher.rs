// Publish pipeline for the announcement channel
// Crossposts qualifying messages, then posts the configured follow-up notice

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};

use crate::models::config::BotConfig;
use crate::Data;

/// Content of the follow-up notice: the role mention plus a trailing space
/// when pinging is on and a role is set, otherwise empty.
pub fn notice_content(config: &BotConfig) -> String {
    match (&config.ping_role_id, config.ping_enabled) {
        (Some(role_id), true) => format!("<@&{role_id}> "),
        _ => String::new(),
    }
}

/// Image embed for the follow-up notice, when enabled and configured
pub fn notice_embed(config: &BotConfig) -> Option<serenity::CreateEmbed> {
    match (&config.image_url, config.image_url_enabled) {
        (Some(url), true) => Some(serenity::CreateEmbed::new().image(url)),
        _ => None,
    }
}

/// Crosspost `msg` and send the follow-up notice.
///
/// Runs only when the bot is on, the message sits in the configured
/// announcement channel and that channel is announcement-capable. Every
/// platform failure is caught and logged right here; this stage never
/// reports an error to the caller, so the reaction pipeline behind it
/// always gets its turn.
pub async fn handle_message(ctx: &serenity::Context, msg: &serenity::Message, data: &Data) {
    let config = data.store.snapshot().await;
    if !config.bot_enabled || !config.is_announcement_channel(msg.channel_id.get()) {
        return;
    }

    // Crossposting only works in announcement ("news") channels
    let channel = match msg.channel(ctx).await {
        Ok(channel) => channel,
        Err(e) => {
            error!("Failed to fetch channel {}: {:?}", msg.channel_id, e);
            return;
        }
    };
    let is_news = channel
        .guild()
        .map(|gc| gc.kind == serenity::ChannelType::News)
        .unwrap_or(false);
    if !is_news {
        debug!(
            "Channel {} is not announcement-capable, skipping crosspost",
            msg.channel_id
        );
        return;
    }

    if let Err(e) = msg.crosspost(&ctx.http).await {
        // Permissions, already published, or plain network trouble;
        // without a crosspost there is nothing to announce
        error!("Failed to crosspost message {}: {:?}", msg.id, e);
        return;
    }
    info!("Crossposted message {} in {}", msg.id, msg.channel_id);

    let mut notice = serenity::CreateMessage::new().content(notice_content(&config));
    if let Some(embed) = notice_embed(&config) {
        notice = notice.embed(embed);
    }
    if let Err(e) = msg.channel_id.send_message(&ctx.http, notice).await {
        error!("Failed to send follow-up notice: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_mentions_role_when_ping_is_on() {
        let mut config = BotConfig::default();
        config.ping_enabled = true;
        config.ping_role_id = Some("42".to_string());
        assert_eq!(notice_content(&config), "<@&42> ");
    }

    #[test]
    fn notice_is_empty_when_ping_is_off_or_unset() {
        let mut config = BotConfig::default();
        config.ping_role_id = Some("42".to_string());
        config.ping_enabled = false;
        assert_eq!(notice_content(&config), "");

        config.ping_enabled = true;
        config.ping_role_id = None;
        assert_eq!(notice_content(&config), "");
    }

    #[test]
    fn embed_present_only_when_enabled_and_configured() {
        let mut config = BotConfig::default();
        config.image_url_enabled = true;
        config.image_url = Some("https://example.com/banner.png".to_string());
        assert!(notice_embed(&config).is_some());

        config.image_url_enabled = false;
        assert!(notice_embed(&config).is_none());

        config.image_url_enabled = true;
        config.image_url = None;
        assert!(notice_embed(&config).is_none());
    }

    #[test]
    fn embed_carries_the_configured_image() {
        let mut config = BotConfig::default();
        config.image_url = Some("https://example.com/banner.png".to_string());
        let embed = notice_embed(&config).unwrap();
        let json = serde_json::to_value(embed).unwrap();
        assert_eq!(
            json["image"]["url"].as_str(),
            Some("https://example.com/banner.png")
        );
    }
}
