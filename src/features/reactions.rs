// Reaction pipeline for the announcement channel
// Picks one primary reaction from the message text, then applies the fixed set

use once_cell::sync::Lazy;
use poise::serenity_prelude as serenity;
use regex::Regex;
use tracing::warn;

use crate::models::config::BotConfig;

/// Custom guild emoji in message text, e.g. `<:blob:123456789>`
static CUSTOM_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<:\w+:\d+>").expect("custom emoji pattern"));

/// Single standard emoji-presentation character
static STANDARD_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Emoji_Presentation}").expect("standard emoji pattern"));

/// Fields of a custom emoji token, captured for building a ReactionType
static CUSTOM_EMOJI_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<:(\w+):(\d+)>$").expect("custom emoji parts pattern"));

/// Compute the ordered reaction sequence for a message.
///
/// Candidates are the custom emoji tokens in the text followed by the
/// standard emoji characters, each class in first-occurrence order. The
/// first candidate not on the deny list becomes the single primary
/// reaction; the rest are ignored. Every fixed reaction is then appended
/// in stored order, deny list notwithstanding.
pub fn select_reactions(text: &str, denied: &[String], fixed: &[String]) -> Vec<String> {
    let candidates = CUSTOM_EMOJI
        .find_iter(text)
        .chain(STANDARD_EMOJI.find_iter(text))
        .map(|m| m.as_str().to_string());

    let primary = candidates
        .into_iter()
        .find(|token| !denied.iter().any(|d| d == token));

    primary.into_iter().chain(fixed.iter().cloned()).collect()
}

/// Reactions to apply to one inbound message, or empty when the stage is
/// gated off. Gating depends only on the toggles and the channel id; the
/// channel kind and whatever the publish stage did (or failed to do) with
/// the same message never factor in.
pub fn message_reactions(config: &BotConfig, channel_id: u64, content: &str) -> Vec<String> {
    if !config.reactions_enabled
        || !config.bot_enabled
        || !config.is_announcement_channel(channel_id)
    {
        return Vec::new();
    }
    select_reactions(content, &config.denied_reactions, &config.fixed_reactions)
}

/// Turn a stored token into something Discord will accept as a reaction.
/// Anything that is not a custom emoji token is sent as a unicode emoji.
pub fn parse_reaction(token: &str) -> serenity::ReactionType {
    if let Some(caps) = CUSTOM_EMOJI_PARTS.captures(token) {
        if let Ok(id) = caps[2].parse::<u64>() {
            return serenity::ReactionType::Custom {
                animated: false,
                id: serenity::EmojiId::new(id),
                name: Some(caps[1].to_string()),
            };
        }
    }
    serenity::ReactionType::Unicode(token.to_string())
}

/// React with each token in order, best effort. A rejected token (unknown
/// emoji, missing permission) is logged and the remaining tokens still run.
pub async fn apply_reactions(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    tokens: &[String],
) {
    for token in tokens {
        if let Err(e) = msg.react(&ctx.http, parse_reaction(token)).await {
            warn!("Failed to react with {}: {:?}", token, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn custom_emoji_scans_before_standard() {
        // The standard emoji appears first in the text but custom tokens win
        let selected = select_reactions("😀 then <:x:123>", &[], &[]);
        assert_eq!(selected, strings(&["<:x:123>"]));
    }

    #[test]
    fn denied_primary_falls_through_to_next_candidate() {
        let selected = select_reactions("<:x:123> 😀", &strings(&["<:x:123>"]), &[]);
        assert_eq!(selected, strings(&["😀"]));
    }

    #[test]
    fn all_candidates_denied_selects_no_primary() {
        let selected = select_reactions("<:x:123> 😀", &strings(&["<:x:123>", "😀"]), &[]);
        assert!(selected.is_empty());
    }

    #[test]
    fn only_first_non_denied_candidate_is_used() {
        let selected = select_reactions("<:a:1> <:b:2> 😀", &[], &[]);
        assert_eq!(selected, strings(&["<:a:1>"]));
    }

    #[test]
    fn fixed_reactions_ignore_the_deny_list() {
        let selected = select_reactions(
            "no emoji here",
            &strings(&["🔥"]),
            &strings(&["🔥", "✅"]),
        );
        assert_eq!(selected, strings(&["🔥", "✅"]));
    }

    #[test]
    fn fixed_reactions_follow_the_primary_in_stored_order() {
        let selected = select_reactions("😀", &[], &strings(&["✅", "🔥"]));
        assert_eq!(selected, strings(&["😀", "✅", "🔥"]));
    }

    #[test]
    fn plain_text_yields_only_fixed_reactions() {
        assert!(select_reactions("hello world", &[], &[]).is_empty());
        let selected = select_reactions("hello world", &[], &strings(&["✅"]));
        assert_eq!(selected, strings(&["✅"]));
    }

    #[test]
    fn selection_is_deterministic() {
        let text = "<:x:123> 😀 <:y:456>";
        let first = select_reactions(text, &[], &[]);
        let second = select_reactions(text, &[], &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn reaction_stage_gates_on_toggles_and_channel_only() {
        let mut config = BotConfig::default();
        config.bot_enabled = true;
        config.reactions_enabled = true;
        config.announcement_channel_id = Some("77".to_string());

        assert_eq!(message_reactions(&config, 77, "😀"), strings(&["😀"]));
        assert!(message_reactions(&config, 78, "😀").is_empty());

        config.reactions_enabled = false;
        assert!(message_reactions(&config, 77, "😀").is_empty());

        config.reactions_enabled = true;
        config.bot_enabled = false;
        assert!(message_reactions(&config, 77, "😀").is_empty());
    }

    #[test]
    fn reaction_stage_ignores_publish_side_configuration() {
        // A message the publish stage can do nothing with (no pingable role,
        // no image, nothing to crosspost in a plain text channel) still gets
        // its reactions; the two stages share only the master switch.
        let mut config = BotConfig::default();
        config.bot_enabled = true;
        config.announcement_channel_id = Some("77".to_string());
        config.ping_enabled = false;
        config.image_url_enabled = false;
        config.fixed_reactions = strings(&["✅"]);

        assert_eq!(message_reactions(&config, 77, "no emoji"), strings(&["✅"]));
    }

    #[test]
    fn custom_token_parses_to_custom_reaction() {
        match parse_reaction("<:blob:123456789>") {
            serenity::ReactionType::Custom { id, name, animated } => {
                assert_eq!(id.get(), 123456789);
                assert_eq!(name.as_deref(), Some("blob"));
                assert!(!animated);
            }
            other => panic!("expected custom reaction, got {:?}", other),
        }
    }

    #[test]
    fn anything_else_parses_to_unicode_reaction() {
        match parse_reaction("😀") {
            serenity::ReactionType::Unicode(s) => assert_eq!(s, "😀"),
            other => panic!("expected unicode reaction, got {:?}", other),
        }
    }
}
