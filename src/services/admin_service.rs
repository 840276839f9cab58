//! Admin service

use chrono::Duration;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{actions, entity_types},
    db::repositories::{ContestRepository, SubmissionRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::admin::response::{
        AccountStatusResponse, AdminUserResponse, AdminUsersListResponse, SystemStatsResponse,
    },
    middleware::auth::AuthenticatedUser,
    models::{NewActivity, Role},
    services::{ActivityService, SessionService},
    utils::{format_duration, Page},
};

/// Admin service for user and system management
pub struct AdminService;

impl AdminService {
    /// List all users with admin details
    pub async fn list_users(
        pool: &PgPool,
        page: Page,
        search: Option<&str>,
        role: Option<Role>,
    ) -> AppResult<AdminUsersListResponse> {
        let (users, total) = UserRepository::list(
            pool,
            page.offset(),
            page.limit(),
            search,
            role.as_ref().map(Role::as_str),
        )
        .await?;

        Ok(AdminUsersListResponse {
            users: users.into_iter().map(AdminUserResponse::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Change a user's role. Existing sessions carry the old role, so they are revoked.
    pub async fn update_user_role(
        pool: &PgPool,
        redis: ConnectionManager,
        admin: &AuthenticatedUser,
        user_id: &Uuid,
        role: Role,
    ) -> AppResult<AccountStatusResponse> {
        if admin.id == *user_id {
            return Err(AppError::Conflict("Admins cannot change their own role".to_string()));
        }

        let current = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if current.role() == Some(role) {
            return Ok(AccountStatusResponse {
                user: current.into(),
                sessions_revoked: 0,
            });
        }

        let user = UserRepository::update_role(pool, user_id, role.as_str()).await?;
        let sessions_revoked = SessionService::revoke_all(redis, user_id).await?;

        info!(admin_id = %admin.id, user_id = %user_id, from = %current.role, to = %role, "User role changed");
        ActivityService::record(
            pool,
            NewActivity::new(Some(admin.id), actions::USER_ROLE_CHANGE)
                .entity(entity_types::USER, *user_id)
                .metadata(serde_json::json!({ "from": current.role, "to": role.as_str() })),
        )
        .await;

        Ok(AccountStatusResponse {
            user: user.into(),
            sessions_revoked,
        })
    }

    /// Deactivate or reactivate an account. Deactivation ends every session.
    pub async fn set_account_active(
        pool: &PgPool,
        redis: ConnectionManager,
        admin: &AuthenticatedUser,
        user_id: &Uuid,
        active: bool,
    ) -> AppResult<AccountStatusResponse> {
        if admin.id == *user_id && !active {
            return Err(AppError::Conflict("Admins cannot deactivate themselves".to_string()));
        }

        if UserRepository::find_by_id(pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let user = UserRepository::set_active(pool, user_id, active).await?;
        let sessions_revoked = if active {
            0
        } else {
            SessionService::revoke_all(redis, user_id).await?
        };

        let action = if active {
            actions::USER_REACTIVATE
        } else {
            actions::USER_DEACTIVATE
        };
        info!(admin_id = %admin.id, user_id = %user_id, active, sessions_revoked, "Account status changed");
        ActivityService::record(
            pool,
            NewActivity::new(Some(admin.id), action).entity(entity_types::USER, *user_id),
        )
        .await;

        Ok(AccountStatusResponse {
            user: user.into(),
            sessions_revoked,
        })
    }

    /// Get system statistics
    pub async fn get_system_stats(pool: &PgPool, uptime_seconds: u64) -> AppResult<SystemStatsResponse> {
        let total_users = UserRepository::count(pool).await?;
        let total_contests = ContestRepository::count(pool).await?;
        let total_submissions = SubmissionRepository::count(pool).await?;

        let pending_submissions: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions WHERE status = 'pending'"#,
        )
        .fetch_one(pool)
        .await?;

        let open_inquiries: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM inquiries WHERE status = 'open'"#)
                .fetch_one(pool)
                .await?;

        Ok(SystemStatsResponse {
            total_users,
            total_contests,
            total_submissions,
            pending_submissions,
            open_inquiries,
            uptime_seconds,
            uptime: format_duration(Duration::seconds(uptime_seconds as i64)),
        })
    }
}
