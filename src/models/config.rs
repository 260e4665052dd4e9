use serde::{Deserialize, Serialize};

/// Bot configuration, persisted as a single JSON object
///
/// Channel and role ids are kept as the raw strings the admin submitted;
/// they are only interpreted when a platform call needs them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BotConfig {
    /// Channel whose messages get crossposted and reacted to
    pub announcement_channel_id: Option<String>,
    /// Role mentioned in the follow-up notice
    pub ping_role_id: Option<String>,
    /// Gate on the role mention
    pub ping_enabled: bool,
    /// Gate on the image embed
    pub image_url_enabled: bool,
    /// Image shown in the follow-up notice
    pub image_url: Option<String>,
    /// Master switch for the publish and reaction pipelines
    pub bot_enabled: bool,
    /// Emoji never auto-selected as the primary reaction
    pub denied_reactions: Vec<String>,
    /// Emoji always applied, in stored order
    pub fixed_reactions: Vec<String>,
    /// Gate on the reaction pipeline
    pub reactions_enabled: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            announcement_channel_id: None,
            ping_role_id: None,
            ping_enabled: true,
            image_url_enabled: true,
            image_url: None,
            bot_enabled: false,
            denied_reactions: Vec::new(),
            fixed_reactions: Vec::new(),
            reactions_enabled: true,
        }
    }
}

impl BotConfig {
    /// True when `channel_id`'s decimal form equals the configured announcement channel
    pub fn is_announcement_channel(&self, channel_id: u64) -> bool {
        self.announcement_channel_id
            .as_deref()
            .map(|id| id == channel_id.to_string())
            .unwrap_or(false)
    }
}
