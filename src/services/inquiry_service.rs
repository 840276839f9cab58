//! Inquiry service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::{actions, entity_types},
    db::repositories::InquiryRepository,
    error::{AppError, AppResult},
    handlers::inquiries::{
        request::CreateInquiryRequest,
        response::{InquiriesListResponse, InquiryResponse},
    },
    middleware::auth::AuthenticatedUser,
    models::{Inquiry, InquiryStatus, NewActivity},
    services::ActivityService,
    utils::{sanitize_string, Page},
};

/// Inquiry service for business logic
pub struct InquiryService;

impl InquiryService {
    /// Store a contact form submission
    pub async fn create(
        pool: &PgPool,
        payload: CreateInquiryRequest,
        ip_address: Option<String>,
    ) -> AppResult<Inquiry> {
        let name = sanitize_string(&payload.name);
        let subject = sanitize_string(&payload.subject);
        let message = sanitize_string(&payload.message);
        if name.is_empty() || subject.is_empty() || message.is_empty() {
            return Err(AppError::Validation(
                "Name, subject and message are required".to_string(),
            ));
        }

        let email = payload.email.trim().to_lowercase();
        let inquiry = InquiryRepository::create(pool, &name, &email, &subject, &message).await?;

        info!(inquiry_id = %inquiry.id, "Inquiry received");
        ActivityService::record(
            pool,
            NewActivity::new(None, actions::INQUIRY_CREATE)
                .entity(entity_types::INQUIRY, inquiry.id)
                .ip(ip_address),
        )
        .await;

        Ok(inquiry)
    }

    /// List inquiries, newest first
    pub async fn list(
        pool: &PgPool,
        status: Option<InquiryStatus>,
        page: Page,
    ) -> AppResult<InquiriesListResponse> {
        let (inquiries, total) = InquiryRepository::list(
            pool,
            status.as_ref().map(InquiryStatus::as_str),
            page.offset(),
            page.limit(),
        )
        .await?;

        Ok(InquiriesListResponse {
            inquiries: inquiries.into_iter().map(InquiryResponse::from).collect(),
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Mark an open inquiry as resolved
    pub async fn resolve(
        pool: &PgPool,
        id: &Uuid,
        admin: &AuthenticatedUser,
    ) -> AppResult<InquiryResponse> {
        let inquiry = InquiryRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

        if InquiryStatus::from_str(&inquiry.status) == Some(InquiryStatus::Resolved) {
            return Err(AppError::Conflict("Inquiry is already resolved".to_string()));
        }

        let resolved = InquiryRepository::resolve(pool, id, &admin.id).await?;

        info!(inquiry_id = %id, admin_id = %admin.id, "Inquiry resolved");
        ActivityService::record(
            pool,
            NewActivity::new(Some(admin.id), actions::INQUIRY_RESOLVE)
                .entity(entity_types::INQUIRY, *id),
        )
        .await;

        Ok(resolved.into())
    }
}
