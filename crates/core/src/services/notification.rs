//! Notification service.

use std::collections::HashMap;

use crate::services::eligibility::{self, NotificationContext, SuppressReason};
use crate::services::settings::{self, NotificationSettings};
use chrono::{DateTime, FixedOffset};
use sea_orm::Set;
use serde::Serialize;
use threddit_common::{AppError, AppResult, IdGenerator};
use threddit_db::{
    entities::{
        notification::{self, NotificationType},
        user,
    },
    repositories::{
        CommunityMuteRepository, CommunityRepository, NotificationRepository,
        UserProfileRepository, UserRepository,
    },
};

/// Result of a push attempt.
#[derive(Debug, Clone)]
pub enum PushResult {
    /// The notification was created.
    Delivered(notification::Model),
    /// Eligibility rejected the notification.
    Suppressed(SuppressReason),
}

/// A notification enriched for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: String,
    pub sender_username: String,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub community_name: Option<String>,
    pub notification_type: &'static str,
    pub is_read: bool,
    pub created_at: DateTime<FixedOffset>,
    /// Resolved from the community when the notification is community-scoped,
    /// otherwise from the sending user.
    pub profile_picture: Option<String>,
    pub is_in_community: bool,
}

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    user_repo: UserRepository,
    community_repo: CommunityRepository,
    mute_repo: CommunityMuteRepository,
    profile_repo: UserProfileRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(
        notification_repo: NotificationRepository,
        user_repo: UserRepository,
        community_repo: CommunityRepository,
        mute_repo: CommunityMuteRepository,
        profile_repo: UserProfileRepository,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
            community_repo,
            mute_repo,
            profile_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a notification for the recipient if eligibility allows it.
    ///
    /// Callers branch on delivered/suppressed only; repository failures
    /// surface as the generic database error.
    pub async fn push(
        &self,
        recipient: &user::Model,
        sender_username: &str,
        context: &NotificationContext,
        kind: NotificationType,
    ) -> AppResult<PushResult> {
        let muted_ids = self.mute_repo.find_community_ids(&recipient.id).await?;
        let profile = self.profile_repo.get_by_user_id(&recipient.id).await?;
        let notification_settings: NotificationSettings =
            settings::parse(&profile.notification_settings)?;

        if let Err(reason) = eligibility::check(
            &recipient.username,
            &muted_ids,
            &notification_settings,
            sender_username,
            context,
            &kind,
        ) {
            tracing::debug!(
                recipient_id = %recipient.id,
                kind = kind.as_str(),
                reason = reason.as_str(),
                "Notification suppressed"
            );
            return Ok(PushResult::Suppressed(reason));
        }

        let model = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            recipient_id: Set(recipient.id.clone()),
            sender_username: Set(sender_username.to_string()),
            post_id: Set(context.post_id.clone()),
            comment_id: Set(context.comment_id.clone()),
            community_name: Set(context.community_name.clone()),
            notification_type: Set(kind),
            is_read: Set(false),
            is_hidden: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = self.notification_repo.create(model).await?;
        Ok(PushResult::Delivered(created))
    }

    /// List a user's visible notifications, newest first, enriched with a
    /// profile picture per row.
    ///
    /// Enrichment uses one batched query over the distinct community names
    /// and one over the distinct sender usernames, never one per row.
    pub async fn list(&self, recipient_id: &str) -> AppResult<Vec<NotificationView>> {
        let rows = self.notification_repo.find_by_recipient(recipient_id).await?;

        let mut community_names: Vec<String> = rows
            .iter()
            .filter_map(|n| n.community_name.clone())
            .collect();
        community_names.sort_unstable();
        community_names.dedup();

        let mut sender_usernames: Vec<String> = rows
            .iter()
            .filter(|n| n.community_name.is_none())
            .map(|n| n.sender_username.clone())
            .collect();
        sender_usernames.sort_unstable();
        sender_usernames.dedup();

        let community_pictures: HashMap<String, Option<String>> = self
            .community_repo
            .find_by_names(&community_names)
            .await?
            .into_iter()
            .map(|c| (c.name, c.profile_picture))
            .collect();

        let sender_pictures: HashMap<String, Option<String>> = self
            .user_repo
            .find_by_usernames(&sender_usernames)
            .await?
            .into_iter()
            .map(|u| (u.username, u.profile_picture))
            .collect();

        let views = rows
            .into_iter()
            .map(|n| {
                let profile_picture = match n.community_name {
                    Some(ref name) => community_pictures.get(name).cloned().flatten(),
                    None => sender_pictures.get(&n.sender_username).cloned().flatten(),
                };
                NotificationView {
                    id: n.id,
                    sender_username: n.sender_username,
                    post_id: n.post_id,
                    comment_id: n.comment_id,
                    is_in_community: n.community_name.is_some(),
                    community_name: n.community_name,
                    notification_type: n.notification_type.as_str(),
                    is_read: n.is_read,
                    created_at: n.created_at,
                    profile_picture,
                }
            })
            .collect();

        Ok(views)
    }

    /// Mark one notification as read.
    pub async fn mark_as_read(&self, recipient_id: &str, notification_id: &str) -> AppResult<()> {
        let model = self
            .notification_repo
            .find_visible(recipient_id, notification_id)
            .await?
            .ok_or_else(|| AppError::NotificationNotFound(notification_id.to_string()))?;

        self.notification_repo.mark_as_read(model).await
    }

    /// Mark every visible notification as read.
    pub async fn mark_all_as_read(&self, recipient_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(recipient_id).await
    }

    /// Hide a notification. There is no unhide.
    pub async fn hide(&self, recipient_id: &str, notification_id: &str) -> AppResult<()> {
        let model = self
            .notification_repo
            .find_visible(recipient_id, notification_id)
            .await?
            .ok_or_else(|| AppError::NotificationNotFound(notification_id.to_string()))?;

        self.notification_repo.hide(model).await
    }

    /// Count unread, visible notifications.
    pub async fn count_unread(&self, recipient_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(recipient_id).await
    }
}
