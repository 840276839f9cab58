//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod activity;
pub mod contest;
pub mod inquiry;
pub mod judging;
pub mod submission;
pub mod user;

pub use activity::*;
pub use contest::*;
pub use inquiry::*;
pub use judging::*;
pub use submission::*;
pub use user::*;
