//! Vidarena - AI-video contest platform backend
//!
//! This library provides the HTTP API behind Vidarena, where hosts run
//! time-boxed contests for AI-generated videos, participants submit entries,
//! and assigned judges score them.
//!
//! # Features
//!
//! - Contest lifecycle (draft, upcoming, open, judging, completed, archived)
//! - Submission moderation and per-participant submission caps
//! - Judge panels with criterion-based scoring and leaderboards
//! - Role-based route guards with login/dashboard redirect hints
//! - Redis-backed sessions with idle and absolute timeouts
//! - Host and admin dashboard analytics
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models
//! - **Analytics**: Pure aggregation over fetched rows

pub mod analytics;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
