//! Community membership service.

use sea_orm::Set;
use threddit_common::{AppError, AppResult, IdGenerator};
use threddit_db::{
    entities::{community, community_member},
    repositories::{CommunityMemberRepository, CommunityRepository},
};

/// Result of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    /// The community is now favorited.
    Favorited,
    /// The community is no longer favorited.
    Unfavorited,
}

impl FavoriteOutcome {
    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorited => "favorited",
            Self::Unfavorited => "unfavorited",
        }
    }
}

/// Community service for business logic.
#[derive(Clone)]
pub struct CommunityService {
    community_repo: CommunityRepository,
    member_repo: CommunityMemberRepository,
    id_gen: IdGenerator,
}

impl CommunityService {
    /// Create a new community service.
    #[must_use]
    pub const fn new(
        community_repo: CommunityRepository,
        member_repo: CommunityMemberRepository,
    ) -> Self {
        Self {
            community_repo,
            member_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Find a community by name, erroring when absent.
    pub async fn get_by_name(&self, name: &str) -> AppResult<community::Model> {
        self.community_repo.get_by_name(name).await
    }

    /// Join a community.
    ///
    /// The member row and `members_count` move in lockstep: the counter is
    /// incremented exactly once per successful join.
    pub async fn join(&self, user_id: &str, community_name: &str) -> AppResult<community_member::Model> {
        let community = self.community_repo.get_by_name(community_name).await?;

        if let Some(existing) = self.member_repo.find_by_pair(&community.id, user_id).await? {
            if existing.is_banned {
                return Err(AppError::Forbidden(
                    "You are banned from this community".to_string(),
                ));
            }
            return Err(AppError::Conflict(
                "Already a member of this community".to_string(),
            ));
        }

        let model = community_member::ActiveModel {
            id: Set(self.id_gen.generate()),
            community_id: Set(community.id.clone()),
            user_id: Set(user_id.to_string()),
            is_favorite: Set(false),
            is_moderator: Set(false),
            is_banned: Set(false),
            disable_updates: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };
        let member = self.member_repo.create(model).await?;

        self.community_repo
            .increment_members_count(&community.id)
            .await?;

        Ok(member)
    }

    /// Leave a community, decrementing `members_count` exactly once.
    pub async fn leave(&self, user_id: &str, community_name: &str) -> AppResult<()> {
        let community = self.community_repo.get_by_name(community_name).await?;

        if self
            .member_repo
            .find_by_pair(&community.id, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::Conflict(
                "Not a member of this community".to_string(),
            ));
        }

        self.member_repo.delete_by_pair(&community.id, user_id).await?;
        self.community_repo
            .decrement_members_count(&community.id)
            .await?;

        Ok(())
    }

    /// Toggle the favorite flag on an existing membership.
    pub async fn toggle_favorite(
        &self,
        user_id: &str,
        community_name: &str,
    ) -> AppResult<FavoriteOutcome> {
        let community = self.community_repo.get_by_name(community_name).await?;

        let member = self
            .member_repo
            .find_by_pair(&community.id, user_id)
            .await?
            .ok_or_else(|| AppError::Conflict("Not a member of this community".to_string()))?;

        let was_favorite = member.is_favorite;
        let mut active: community_member::ActiveModel = member.into();
        active.is_favorite = Set(!was_favorite);
        self.member_repo.update(active).await?;

        Ok(if was_favorite {
            FavoriteOutcome::Unfavorited
        } else {
            FavoriteOutcome::Favorited
        })
    }
}
