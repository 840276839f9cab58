//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Largest accepted request body; entries link to video, they never upload it
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Seconds to wait for a pooled connection before failing
pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default access token expiry in minutes
pub const DEFAULT_JWT_EXPIRY_MINUTES: i64 = 30;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Length of opaque refresh tokens
pub const REFRESH_TOKEN_LENGTH: usize = 48;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Default idle timeout before a session expires
pub const DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES: i64 = 60;

/// Default hard limit on a session's lifetime
pub const DEFAULT_SESSION_ABSOLUTE_TIMEOUT_HOURS: i64 = 24;

/// Redis key prefixes
pub mod redis_keys {
    pub const SESSION: &str = "session";
    pub const USER_SESSIONS: &str = "user_sessions";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const RATE_LIMIT: &str = "rate_limit";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const HOST: &str = "host";
    pub const JUDGE: &str = "judge";
    pub const PARTICIPANT: &str = "participant";
}

// =============================================================================
// CONTEST SETTINGS
// =============================================================================

/// Contest publication statuses
pub mod contest_statuses {
    pub const DRAFT: &str = "draft";
    pub const PUBLISHED: &str = "published";
    pub const ARCHIVED: &str = "archived";
}

/// Default cap on submissions per participant per contest
pub const DEFAULT_MAX_SUBMISSIONS_PER_USER: i32 = 3;

/// Upper bound a host may configure for submissions per participant
pub const MAX_SUBMISSIONS_PER_USER_LIMIT: i32 = 20;

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission moderation statuses
pub mod submission_statuses {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const WITHDRAWN: &str = "withdrawn";
}

// =============================================================================
// JUDGING
// =============================================================================

/// Minimum value of a single score criterion
pub const MIN_CRITERION_SCORE: i16 = 0;

/// Maximum value of a single score criterion
pub const MAX_CRITERION_SCORE: i16 = 10;

/// Number of criteria making up a score total
pub const SCORE_CRITERIA_COUNT: i16 = 3;

/// Highest possible score total
pub const MAX_SCORE_TOTAL: i16 = MAX_CRITERION_SCORE * SCORE_CRITERIA_COUNT;

// =============================================================================
// ANALYTICS
// =============================================================================

/// Default analytics window in days
pub const DEFAULT_ANALYTICS_WINDOW_DAYS: i64 = 30;

/// Longest analytics window accepted
pub const MAX_ANALYTICS_WINDOW_DAYS: i64 = 365;

/// Width of each score distribution bucket
pub const SCORE_BUCKET_WIDTH: i16 = 5;

/// Number of entries in a contest leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// Number of actions in the platform "top actions" list
pub const TOP_ACTIONS_SIZE: usize = 10;

// =============================================================================
// ACTIVITY LOG ACTIONS
// =============================================================================

/// Activity log action identifiers
pub mod actions {
    pub const USER_REGISTER: &str = "user.register";
    pub const USER_LOGIN: &str = "user.login";
    pub const USER_LOGOUT: &str = "user.logout";
    pub const USER_ROLE_CHANGE: &str = "user.role_change";
    pub const USER_DEACTIVATE: &str = "user.deactivate";
    pub const USER_REACTIVATE: &str = "user.reactivate";
    pub const CONTEST_CREATE: &str = "contest.create";
    pub const CONTEST_UPDATE: &str = "contest.update";
    pub const CONTEST_PUBLISH: &str = "contest.publish";
    pub const CONTEST_ARCHIVE: &str = "contest.archive";
    pub const CONTEST_DELETE: &str = "contest.delete";
    pub const SUBMISSION_CREATE: &str = "submission.create";
    pub const SUBMISSION_WITHDRAW: &str = "submission.withdraw";
    pub const SUBMISSION_REVIEW: &str = "submission.review";
    pub const JUDGE_ASSIGN: &str = "judge.assign";
    pub const JUDGE_UNASSIGN: &str = "judge.unassign";
    pub const SCORE_UPSERT: &str = "score.upsert";
    pub const INQUIRY_CREATE: &str = "inquiry.create";
    pub const INQUIRY_RESOLVE: &str = "inquiry.resolve";
}

/// Entity types referenced by activity logs
pub mod entity_types {
    pub const USER: &str = "user";
    pub const CONTEST: &str = "contest";
    pub const SUBMISSION: &str = "submission";
    pub const SCORE: &str = "score";
    pub const INQUIRY: &str = "inquiry";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

/// Front-end login page used in redirect hints
pub const LOGIN_PATH: &str = "/login";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Submission endpoint - max requests
    pub const SUBMISSION_MAX_REQUESTS: i64 = 10;
    /// Submission endpoint - window in seconds
    pub const SUBMISSION_WINDOW_SECS: i64 = 60;

    /// Contact form - max requests
    pub const INQUIRY_MAX_REQUESTS: i64 = 3;
    /// Contact form - window in seconds
    pub const INQUIRY_WINDOW_SECS: i64 = 300;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 120;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum contest title length
pub const MAX_CONTEST_TITLE_LENGTH: u64 = 200;

/// Maximum contest slug length
pub const MAX_CONTEST_SLUG_LENGTH: u64 = 80;

/// Maximum long-form text length (descriptions, rules)
pub const MAX_LONG_TEXT_LENGTH: u64 = 20_000;

/// Maximum submission title length
pub const MAX_SUBMISSION_TITLE_LENGTH: u64 = 150;

/// Maximum length of a URL field
pub const MAX_URL_LENGTH: u64 = 2048;

/// Maximum number of AI tools listed on a submission
pub const MAX_AI_TOOLS: usize = 10;

/// Maximum inquiry message length
pub const MAX_INQUIRY_MESSAGE_LENGTH: u64 = 5_000;
