//! Throwaway Postgres and Redis containers for store-backed tests.
//!
//! Each test starts its own containers; they are removed when the handle drops.

#![allow(dead_code)]

use redis::aio::ConnectionManager;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::{postgres::Postgres, redis::Redis};
use uuid::Uuid;

use vidarena::{
    config::{
        AnalyticsConfig, Config, CorsConfig, DatabaseConfig, JwtConfig, RedisConfig,
        ServerConfig, SessionConfig,
    },
    db::{self, repositories::UserRepository},
    middleware::AuthenticatedUser,
    models::{Role, User},
    services::session_service::SessionPolicy,
};

pub struct TestRedis {
    pub conn: ConnectionManager,
    _container: ContainerAsync<Redis>,
}

pub struct TestDb {
    pub pool: PgPool,
    _container: ContainerAsync<Postgres>,
}

/// Start a Redis container and connect to it
pub async fn start_redis() -> TestRedis {
    let container = Redis::default()
        .start()
        .await
        .expect("Failed to start Redis container");
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(6379).await.unwrap();

    let client = redis::Client::open(format!("redis://{}:{}", host, port)).unwrap();
    let conn = ConnectionManager::new(client)
        .await
        .expect("Failed to connect to Redis");

    TestRedis {
        conn,
        _container: container,
    }
}

/// Start a PostgreSQL container, connect and run migrations
pub async fn start_postgres() -> TestDb {
    let container = Postgres::default()
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    TestDb {
        pool,
        _container: container,
    }
}

pub fn policy() -> SessionPolicy {
    SessionPolicy::from_config(&config().session)
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            json_logs: false,
            request_timeout_secs: 30,
            trust_proxy_headers: false,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
        },
        redis: RedisConfig { url: String::new() },
        jwt: JwtConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
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

/// Insert a user with the given role; the password hash is a placeholder
pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
    UserRepository::create(
        pool,
        username,
        &format!("{}@example.com", username),
        "not-a-real-hash",
        None,
        role.as_str(),
    )
    .await
    .expect("Failed to create user")
}

/// Caller identity as the auth middleware would build it
pub fn as_caller(user: &User) -> AuthenticatedUser {
    AuthenticatedUser {
        id: user.id,
        username: user.username.clone(),
        role: user.role().unwrap_or(Role::Participant),
        session_id: Uuid::new_v4(),
    }
}
