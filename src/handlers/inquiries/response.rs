//! Inquiry response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Inquiry;

/// Acknowledgement returned to the sender
#[derive(Debug, Serialize)]
pub struct InquiryReceivedResponse {
    pub id: Uuid,
    pub message: String,
}

/// Inquiry as seen by admins
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub resolved_by: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(i: Inquiry) -> Self {
        Self {
            id: i.id,
            name: i.name,
            email: i.email,
            subject: i.subject,
            message: i.message,
            status: i.status,
            resolved_by: i.resolved_by,
            resolved_at: i.resolved_at,
            created_at: i.created_at,
        }
    }
}

/// Inbox response
#[derive(Debug, Serialize)]
pub struct InquiriesListResponse {
    pub inquiries: Vec<InquiryResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
