//! Database entities.

#![allow(missing_docs)]

pub mod blocking;
pub mod community;
pub mod community_member;
pub mod community_mute;
pub mod following;
pub mod notification;
pub mod user;
pub mod user_profile;
pub mod user_report;

pub use blocking::Entity as Blocking;
pub use community::Entity as Community;
pub use community_member::Entity as CommunityMember;
pub use community_mute::Entity as CommunityMute;
pub use following::Entity as Following;
pub use notification::Entity as Notification;
pub use user::Entity as User;
pub use user_profile::Entity as UserProfile;
pub use user_report::Entity as UserReport;
