//! Business logic services

pub mod activity_service;
pub mod admin_service;
pub mod analytics_service;
pub mod auth_service;
pub mod contest_service;
pub mod inquiry_service;
pub mod judging_service;
pub mod session_service;
pub mod submission_service;
pub mod user_service;

pub use activity_service::ActivityService;
pub use admin_service::AdminService;
pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
pub use contest_service::ContestService;
pub use inquiry_service::InquiryService;
pub use judging_service::JudgingService;
pub use session_service::SessionService;
pub use submission_service::SubmissionService;
pub use user_service::UserService;
