//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::{redis_keys, roles, REFRESH_TOKEN_LENGTH},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    services::session_service::{SessionPolicy, SessionRecord, SessionService},
    utils::{generate_secure_token, hash_string},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    /// Session the token belongs to
    pub sid: String,
    pub exp: i64,
    pub iat: i64,
}

/// Access and refresh token pair handed to the client
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub session_id: Uuid,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new participant account
    pub async fn register(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AppResult<User> {
        // Check if username exists
        if UserRepository::find_by_username(pool, username).await?.is_some() {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        // Check if email exists
        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;

        let user = UserRepository::create(
            pool,
            username,
            email,
            &password_hash,
            display_name,
            roles::PARTICIPANT,
        )
        .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with username/email and password, opening a new session
    pub async fn login(
        pool: &PgPool,
        redis: ConnectionManager,
        config: &Config,
        policy: SessionPolicy,
        identifier: &str,
        password: &str,
    ) -> AppResult<(User, IssuedTokens)> {
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Verify the password before revealing anything about the account state
        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDeactivated);
        }

        if user.role().is_none() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "User {} has unknown role '{}'",
                user.id,
                user.role
            )));
        }

        UserRepository::update_last_login(pool, &user.id).await?;

        let session = SessionService::open(redis.clone(), policy, &user.id, &user.role).await?;
        let tokens = Self::issue_tokens(redis, config, &user, &session).await?;

        info!(user_id = %user.id, session_id = %session.session_id, "User logged in");
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new token pair on the same session
    pub async fn refresh(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        policy: SessionPolicy,
        refresh_token: &str,
    ) -> AppResult<IssuedTokens> {
        let key = refresh_token_key(refresh_token);
        let value: Option<String> = redis.get(&key).await?;
        let value = value.ok_or(AppError::InvalidToken)?;

        // Rotate: the presented token is single-use
        redis.del::<_, ()>(&key).await?;

        let (user_id, session_id) = parse_refresh_value(&value).ok_or(AppError::InvalidToken)?;

        let session = SessionService::touch(redis.clone(), policy, &session_id).await?;
        if session.user_id != user_id {
            return Err(AppError::InvalidToken);
        }

        let user = UserRepository::find_by_id(pool, &user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            SessionService::revoke_all(redis, &user.id).await?;
            return Err(AppError::AccountDeactivated);
        }

        debug!(user_id = %user.id, session_id = %session_id, "Refreshing tokens");
        Self::issue_tokens(redis, config, &user, &session).await
    }

    /// End the current session, or every session of the user.
    ///
    /// Returns the number of sessions closed.
    pub async fn logout(
        mut redis: ConnectionManager,
        user_id: &Uuid,
        session_id: &Uuid,
        all_sessions: bool,
        refresh_token: Option<&str>,
    ) -> AppResult<usize> {
        if let Some(token) = refresh_token {
            redis.del::<_, ()>(refresh_token_key(token)).await?;
        }

        let closed = if all_sessions {
            SessionService::revoke_all(redis, user_id).await?
        } else {
            SessionService::revoke(redis, user_id, session_id).await?;
            1
        };

        info!(user_id = %user_id, closed, "User logged out");
        Ok(closed)
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Create a signed access token bound to a session
    pub fn generate_access_token(
        user: &User,
        session_id: &Uuid,
        config: &Config,
    ) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(config.jwt.expiry_minutes);
        let expires_in = config.jwt.expiry_minutes * 60;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.clone(),
            sid: session_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    async fn issue_tokens(
        mut redis: ConnectionManager,
        config: &Config,
        user: &User,
        session: &SessionRecord,
    ) -> AppResult<IssuedTokens> {
        let (access_token, expires_in) =
            Self::generate_access_token(user, &session.session_id, config)?;
        let refresh_token = generate_secure_token(REFRESH_TOKEN_LENGTH);

        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis
            .set_ex::<_, _, ()>(
                refresh_token_key(&refresh_token),
                format!("{}:{}", user.id, session.session_id),
                expiry as u64,
            )
            .await?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            expires_in,
            session_id: session.session_id,
        })
    }
}

/// Refresh tokens are stored by hash so a Redis dump does not leak usable tokens
fn refresh_token_key(token: &str) -> String {
    format!("{}:{}", redis_keys::REFRESH_TOKEN, hash_string(token))
}

fn parse_refresh_value(value: &str) -> Option<(Uuid, Uuid)> {
    let (user_id, session_id) = value.split_once(':')?;
    Some((
        Uuid::parse_str(user_id).ok()?,
        Uuid::parse_str(session_id).ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AnalyticsConfig, CorsConfig, DatabaseConfig, JwtConfig, RedisConfig, ServerConfig,
        SessionConfig,
    };

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
                json_logs: false,
                request_timeout_secs: 30,
                trust_proxy_headers: false,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_minutes: 15,
                refresh_token_expiry_days: 7,
            },
            session: SessionConfig {
                idle_timeout_minutes: 30,
                absolute_timeout_hours: 8,
            },
            analytics: AnalyticsConfig {
                default_window_days: 30,
            },
            cors: CorsConfig {
                allowed_origins: vec![],
            },
        }
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "mira".to_string(),
            email: "mira@example.com".to_string(),
            password_hash: String::new(),
            display_name: None,
            avatar_url: None,
            bio: None,
            role: roles::HOST.to_string(),
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_access_token_carries_session() {
        let config = config();
        let user = user();
        let session_id = Uuid::new_v4();

        let (token, expires_in) =
            AuthService::generate_access_token(&user, &session_id, &config).unwrap();
        assert_eq!(expires_in, 15 * 60);

        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.sid, session_id.to_string());
        assert_eq!(claims.role, "host");
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let config = config();
        let (token, _) =
            AuthService::generate_access_token(&user(), &Uuid::new_v4(), &config).unwrap();

        let err = AuthService::verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_refresh_value_parsing() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let value = format!("{}:{}", user_id, session_id);

        assert_eq!(parse_refresh_value(&value), Some((user_id, session_id)));
        assert_eq!(parse_refresh_value("garbage"), None);
        assert_eq!(parse_refresh_value("a:b"), None);
    }
}
