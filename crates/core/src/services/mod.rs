//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod blocking;
pub mod community;
pub mod eligibility;
pub mod email;
pub mod following;
pub mod muting;
pub mod notification;
pub mod settings;
pub mod user;

pub use account::AccountService;
pub use blocking::{BlockOutcome, BlockingService};
pub use community::{CommunityService, FavoriteOutcome};
pub use eligibility::{NotificationContext, SuppressReason};
pub use email::EmailService;
pub use following::{FollowOutcome, FollowingService, UnfollowOutcome};
pub use muting::{MuteOutcome, MutingService};
pub use notification::{NotificationService, NotificationView, PushResult};
pub use settings::{
    ChatSettings, EmailSettings, FeedSettings, NotificationSettings, ProfileSettings,
    SafetySettings, SettingsCategory,
};
pub use user::UserService;
