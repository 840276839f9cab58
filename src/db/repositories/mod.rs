//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod activity_repo;
pub mod analytics_repo;
pub mod contest_repo;
pub mod inquiry_repo;
pub mod judging_repo;
pub mod submission_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use analytics_repo::AnalyticsRepository;
pub use contest_repo::{ContestChanges, ContestRepository, NewContest};
pub use inquiry_repo::InquiryRepository;
pub use judging_repo::{JudgeQueueItem, JudgingRepository, PanelMember};
pub use submission_repo::{NewSubmission, SubmissionRepository, SubmissionWithAuthor};
pub use user_repo::UserRepository;
