//! User service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{SubmissionRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::users::{request::UpdateProfileRequest, response::PublicProfileResponse},
    models::User,
    services::AuthService,
    utils::{sanitize_string, validate_media_url},
};

/// User service for profile management
pub struct UserService;

impl UserService {
    /// Get user by ID
    pub async fn get_user(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Public profile by username; deactivated accounts are hidden
    pub async fn get_public_profile(pool: &PgPool, username: &str) -> AppResult<PublicProfileResponse> {
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let approved_submissions = SubmissionRepository::count_approved_for_user(pool, &user.id).await?;

        Ok(PublicProfileResponse {
            id: user.id,
            display_name: user.public_name().to_string(),
            username: user.username,
            avatar_url: user.avatar_url,
            bio: user.bio,
            role: user.role,
            approved_submissions,
            created_at: user.created_at,
        })
    }

    /// Update the caller's own profile
    pub async fn update_profile(
        pool: &PgPool,
        user_id: &Uuid,
        payload: UpdateProfileRequest,
    ) -> AppResult<User> {
        if let Some(url) = payload.avatar_url.as_deref() {
            validate_media_url(url).map_err(|e| AppError::Validation(e.to_string()))?;
        }

        // If changing password, verify current password
        let password_hash = match payload.new_password.as_deref() {
            Some(new_password) => {
                let current_password = payload
                    .current_password
                    .as_deref()
                    .ok_or_else(|| AppError::Validation("Current password required".to_string()))?;

                let user = Self::get_user(pool, user_id).await?;
                if !AuthService::verify_password(current_password, &user.password_hash)? {
                    return Err(AppError::InvalidCredentials);
                }

                Some(AuthService::hash_password(new_password)?)
            }
            None => None,
        };

        let display_name = payload.display_name.as_deref().map(sanitize_string);
        let bio = payload.bio.as_deref().map(sanitize_string);

        UserRepository::update_profile(
            pool,
            user_id,
            display_name.as_deref(),
            payload.avatar_url.as_deref(),
            bio.as_deref(),
            password_hash.as_deref(),
        )
        .await
    }
}
