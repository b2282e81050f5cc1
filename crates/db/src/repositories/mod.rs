//! Entity repositories.
//!
//! One repository per entity, each holding a shared database handle. All
//! database errors are normalized to [`threddit_common::AppError::Database`].

mod blocking;
mod community;
mod community_member;
mod community_mute;
mod following;
mod notification;
mod user;
mod user_profile;
mod user_report;

pub use blocking::BlockingRepository;
pub use community::CommunityRepository;
pub use community_member::CommunityMemberRepository;
pub use community_mute::CommunityMuteRepository;
pub use following::FollowingRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use user_profile::UserProfileRepository;
pub use user_report::UserReportRepository;
