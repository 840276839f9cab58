//! Admin response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ActivityLog, User};

/// System statistics response
#[derive(Debug, Serialize)]
pub struct SystemStatsResponse {
    pub total_users: i64,
    pub total_contests: i64,
    pub total_submissions: i64,
    pub pending_submissions: i64,
    pub open_inquiries: i64,
    pub uptime_seconds: u64,
    pub uptime: String,
}

/// Admin user view response
#[derive(Debug, Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Admin users list response
#[derive(Debug, Serialize)]
pub struct AdminUsersListResponse {
    pub users: Vec<AdminUserResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Account status change response
#[derive(Debug, Serialize)]
pub struct AccountStatusResponse {
    pub user: AdminUserResponse,
    /// Sessions closed as part of the change
    pub sessions_revoked: usize,
}

/// Activity log entry
#[derive(Debug, Serialize)]
pub struct ActivityLogResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            metadata: log.metadata,
            ip_address: log.ip_address,
            created_at: log.created_at,
        }
    }
}

/// Activity logs list response
#[derive(Debug, Serialize)]
pub struct ActivityLogsListResponse {
    pub logs: Vec<ActivityLogResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
