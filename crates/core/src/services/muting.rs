//! Community muting service.

use sea_orm::Set;
use threddit_common::{AppResult, IdGenerator};
use threddit_db::{
    entities::community_mute,
    repositories::{CommunityMuteRepository, CommunityRepository},
};

/// Result of a mute toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteOutcome {
    /// The community is now muted.
    Muted,
    /// The community is no longer muted.
    Unmuted,
}

impl MuteOutcome {
    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Muted => "muted",
            Self::Unmuted => "unmuted",
        }
    }
}

/// Muting service for business logic.
#[derive(Clone)]
pub struct MutingService {
    mute_repo: CommunityMuteRepository,
    community_repo: CommunityRepository,
    id_gen: IdGenerator,
}

impl MutingService {
    /// Create a new muting service.
    #[must_use]
    pub const fn new(
        mute_repo: CommunityMuteRepository,
        community_repo: CommunityRepository,
    ) -> Self {
        Self {
            mute_repo,
            community_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the mute state for a community resolved by name. No cascade;
    /// two calls cancel out.
    pub async fn toggle_mute(
        &self,
        user_id: &str,
        community_name: &str,
    ) -> AppResult<MuteOutcome> {
        let community = self.community_repo.get_by_name(community_name).await?;

        if self.mute_repo.is_muted(user_id, &community.id).await? {
            self.mute_repo.delete_by_pair(user_id, &community.id).await?;
            return Ok(MuteOutcome::Unmuted);
        }

        let model = community_mute::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            community_id: Set(community.id.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.mute_repo.create(model).await?;

        Ok(MuteOutcome::Muted)
    }

    /// Check if a user has muted a community.
    pub async fn is_muted(&self, user_id: &str, community_id: &str) -> AppResult<bool> {
        self.mute_repo.is_muted(user_id, community_id).await
    }

    /// Ids of every community the user has muted.
    pub async fn muted_community_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.mute_repo.find_community_ids(user_id).await
    }
}
