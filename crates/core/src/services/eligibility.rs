//! Notification eligibility rules.
//!
//! Pure decision logic: no I/O. Rules run in a fixed, observable order and
//! the first failing rule wins: community mute, then self-notification, then
//! the per-type setting.

use crate::services::settings::NotificationSettings;
use threddit_db::entities::notification::NotificationType;

/// Content that triggered a notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationContext {
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    /// Set when the triggering post or comment belongs to a community.
    pub community_id: Option<String>,
    pub community_name: Option<String>,
}

impl NotificationContext {
    /// Context for content posted outside any community.
    #[must_use]
    pub const fn standalone(post_id: Option<String>, comment_id: Option<String>) -> Self {
        Self {
            post_id,
            comment_id,
            community_id: None,
            community_name: None,
        }
    }

    /// Context for content posted inside a community.
    #[must_use]
    pub const fn in_community(
        post_id: Option<String>,
        comment_id: Option<String>,
        community_id: String,
        community_name: String,
    ) -> Self {
        Self {
            post_id,
            comment_id,
            community_id: Some(community_id),
            community_name: Some(community_name),
        }
    }
}

/// Why a notification was not created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// The recipient has muted the community the content belongs to.
    CommunityMuted,
    /// A user is never notified about their own action.
    SelfNotification,
    /// The recipient disabled this notification type.
    TypeDisabled,
}

impl SuppressReason {
    /// Stable wire name for logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommunityMuted => "community_muted",
            Self::SelfNotification => "self_notification",
            Self::TypeDisabled => "type_disabled",
        }
    }
}

/// Decide whether a notification may be created.
///
/// Mute outranks self outranks settings; callers depend on which reason is
/// returned when several conditions hold at once.
pub fn check(
    recipient_username: &str,
    muted_community_ids: &[String],
    settings: &NotificationSettings,
    sender_username: &str,
    context: &NotificationContext,
    kind: &NotificationType,
) -> Result<(), SuppressReason> {
    if let Some(ref community_id) = context.community_id
        && muted_community_ids.iter().any(|id| id == community_id)
    {
        return Err(SuppressReason::CommunityMuted);
    }

    if recipient_username == sender_username {
        return Err(SuppressReason::SelfNotification);
    }

    if !settings.is_enabled(kind) {
        return Err(SuppressReason::TypeDisabled);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community_context() -> NotificationContext {
        NotificationContext::in_community(
            None,
            Some("c1".to_string()),
            "com1".to_string(),
            "rustaceans".to_string(),
        )
    }

    #[test]
    fn test_muted_community_suppresses() {
        let result = check(
            "alice",
            &["com1".to_string()],
            &NotificationSettings::default(),
            "bob",
            &community_context(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::CommunityMuted));
    }

    #[test]
    fn test_self_notification_suppressed_regardless_of_settings() {
        let settings = NotificationSettings {
            comments: false,
            ..NotificationSettings::default()
        };

        let result = check(
            "alice",
            &[],
            &settings,
            "alice",
            &NotificationContext::default(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::SelfNotification));
    }

    #[test]
    fn test_disabled_type_suppresses() {
        let settings = NotificationSettings {
            comments: false,
            ..NotificationSettings::default()
        };

        let result = check(
            "alice",
            &[],
            &settings,
            "bob",
            &NotificationContext::default(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::TypeDisabled));
    }

    #[test]
    fn test_mute_outranks_disabled_type() {
        let settings = NotificationSettings {
            comments: false,
            ..NotificationSettings::default()
        };

        let result = check(
            "alice",
            &["com1".to_string()],
            &settings,
            "bob",
            &community_context(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::CommunityMuted));
    }

    #[test]
    fn test_mute_outranks_self() {
        let result = check(
            "alice",
            &["com1".to_string()],
            &NotificationSettings::default(),
            "alice",
            &community_context(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::CommunityMuted));
    }

    #[test]
    fn test_self_outranks_disabled_type() {
        let settings = NotificationSettings {
            comments: false,
            ..NotificationSettings::default()
        };

        let result = check(
            "alice",
            &[],
            &settings,
            "alice",
            &NotificationContext::default(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Err(SuppressReason::SelfNotification));
    }

    #[test]
    fn test_unmuted_community_passes() {
        let result = check(
            "alice",
            &["other".to_string()],
            &NotificationSettings::default(),
            "bob",
            &community_context(),
            &NotificationType::Comments,
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_defaults_are_eligible() {
        let result = check(
            "alice",
            &[],
            &NotificationSettings::default(),
            "bob",
            &NotificationContext::default(),
            &NotificationType::NewFollowers,
        );
        assert_eq!(result, Ok(()));
    }
}
