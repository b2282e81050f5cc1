//! Typed per-category user settings.
//!
//! Settings are stored as JSONB, one column per category. Reads and writes
//! round-trip through these structs, so unknown fields are dropped and
//! missing fields take their defaults. A fresh profile has every
//! notification type enabled.

use serde::{Deserialize, Serialize};
use threddit_common::{AppError, AppResult};
use threddit_db::entities::notification::NotificationType;

const fn default_true() -> bool {
    true
}

fn default_everyone() -> String {
    "everyone".to_string()
}

/// Settings category, dispatched as a closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsCategory {
    Profile,
    Feed,
    Notifications,
    Chat,
    Email,
    Safety,
}

/// Profile settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub about: Option<String>,
    pub social_links: Vec<String>,
    #[serde(default = "default_true")]
    pub content_visibility: bool,
    #[serde(default = "default_true")]
    pub active_in_communities_visibility: bool,
}

/// Feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub adult_content: bool,
    #[serde(default = "default_true")]
    pub autoplay_media: bool,
    pub community_content_sort: String,
    pub global_content_view: String,
    pub open_posts_in_new_tab: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            adult_content: false,
            autoplay_media: true,
            community_content_sort: "hot".to_string(),
            global_content_view: "card".to_string(),
            open_posts_in_new_tab: false,
        }
    }
}

/// Per-type notification toggles. A missing field means enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub upvotes_posts: bool,
    #[serde(default = "default_true")]
    pub upvotes_comments: bool,
    #[serde(default = "default_true")]
    pub comments: bool,
    #[serde(default = "default_true")]
    pub replies: bool,
    #[serde(default = "default_true")]
    pub new_followers: bool,
    #[serde(default = "default_true")]
    pub invitations: bool,
    #[serde(default = "default_true")]
    pub private_messages: bool,
    #[serde(default = "default_true")]
    pub mentions: bool,
    #[serde(default = "default_true")]
    pub chat_messages: bool,
    #[serde(default = "default_true")]
    pub chat_requests: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            upvotes_posts: true,
            upvotes_comments: true,
            comments: true,
            replies: true,
            new_followers: true,
            invitations: true,
            private_messages: true,
            mentions: true,
            chat_messages: true,
            chat_requests: true,
        }
    }
}

impl NotificationSettings {
    /// Whether the given notification type is enabled.
    #[must_use]
    pub const fn is_enabled(&self, kind: &NotificationType) -> bool {
        match kind {
            NotificationType::UpvotesPosts => self.upvotes_posts,
            NotificationType::UpvotesComments => self.upvotes_comments,
            NotificationType::Comments => self.comments,
            NotificationType::Replies => self.replies,
            NotificationType::NewFollowers => self.new_followers,
            NotificationType::Invitations => self.invitations,
            NotificationType::PrivateMessages => self.private_messages,
            NotificationType::Mentions => self.mentions,
            NotificationType::ChatMessages => self.chat_messages,
            NotificationType::ChatRequests => self.chat_requests,
        }
    }
}

/// Chat and messaging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    #[serde(default = "default_everyone")]
    pub chat_requests_from: String,
    #[serde(default = "default_everyone")]
    pub private_messages_from: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            chat_requests_from: default_everyone(),
            private_messages_from: default_everyone(),
        }
    }
}

/// Email settings: which events produce an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    #[serde(default = "default_true")]
    pub new_followers: bool,
    #[serde(default = "default_true")]
    pub chat_requests: bool,
    pub unsubscribe_from_all: bool,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            new_followers: true,
            chat_requests: true,
            unsubscribe_from_all: false,
        }
    }
}

impl EmailSettings {
    /// Whether follower emails may be sent.
    #[must_use]
    pub const fn follower_emails_enabled(&self) -> bool {
        self.new_followers && !self.unsubscribe_from_all
    }
}

/// Safety and privacy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetySettings {
    #[serde(default = "default_true")]
    pub allow_search_engine_indexing: bool,
    #[serde(default = "default_true")]
    pub allow_people_to_follow_you: bool,
    #[serde(default = "default_true")]
    pub show_in_search_results: bool,
}

impl Default for SafetySettings {
    fn default() -> Self {
        Self {
            allow_search_engine_indexing: true,
            allow_people_to_follow_you: true,
            show_in_search_results: true,
        }
    }
}

/// Parse a stored settings column, falling back to defaults on older rows.
pub fn parse<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::Internal(format!("Invalid stored settings: {e}")))
}

/// Normalize an incoming settings payload through its typed struct.
///
/// Unknown fields are dropped; missing fields take defaults.
pub fn normalize(
    category: SettingsCategory,
    value: serde_json::Value,
) -> AppResult<serde_json::Value> {
    let normalized = match category {
        SettingsCategory::Profile => serde_json::to_value(from_payload::<ProfileSettings>(value)?),
        SettingsCategory::Feed => serde_json::to_value(from_payload::<FeedSettings>(value)?),
        SettingsCategory::Notifications => {
            serde_json::to_value(from_payload::<NotificationSettings>(value)?)
        }
        SettingsCategory::Chat => serde_json::to_value(from_payload::<ChatSettings>(value)?),
        SettingsCategory::Email => serde_json::to_value(from_payload::<EmailSettings>(value)?),
        SettingsCategory::Safety => serde_json::to_value(from_payload::<SafetySettings>(value)?),
    };

    normalized.map_err(|e| AppError::Internal(format!("Failed to serialize settings: {e}")))
}

fn from_payload<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid settings: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_notification_settings_all_enabled() {
        let settings = NotificationSettings::default();
        assert!(settings.is_enabled(&NotificationType::Comments));
        assert!(settings.is_enabled(&NotificationType::NewFollowers));
        assert!(settings.is_enabled(&NotificationType::ChatRequests));
    }

    #[test]
    fn test_missing_fields_default_to_enabled() {
        let settings: NotificationSettings =
            serde_json::from_value(json!({ "comments": false })).unwrap();
        assert!(!settings.is_enabled(&NotificationType::Comments));
        assert!(settings.is_enabled(&NotificationType::Replies));
    }

    #[test]
    fn test_normalize_drops_unknown_fields() {
        let normalized = normalize(
            SettingsCategory::Notifications,
            json!({ "comments": false, "bogus": 42 }),
        )
        .unwrap();

        assert_eq!(normalized["comments"], json!(false));
        assert!(normalized.get("bogus").is_none());
        assert_eq!(normalized["replies"], json!(true));
    }

    #[test]
    fn test_unsubscribe_from_all_wins() {
        let settings: EmailSettings =
            serde_json::from_value(json!({ "new_followers": true, "unsubscribe_from_all": true }))
                .unwrap();
        assert!(!settings.follower_emails_enabled());
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(
            serde_json::to_value(SettingsCategory::Notifications).unwrap(),
            json!("notifications")
        );
        let parsed: SettingsCategory = serde_json::from_value(json!("safety")).unwrap();
        assert_eq!(parsed, SettingsCategory::Safety);
    }
}
