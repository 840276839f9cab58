//! Inquiry handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::{auth::AuthenticatedUser, client_ip::ClientIp},
    models::InquiryStatus,
    services::InquiryService,
    state::AppState,
    utils::Page,
};

use super::{
    request::{CreateInquiryRequest, ListInquiriesQuery},
    response::{InquiriesListResponse, InquiryReceivedResponse, InquiryResponse},
};

/// Submit the contact form
pub async fn create_inquiry(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(payload): Json<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<InquiryReceivedResponse>)> {
    payload.validate()?;

    let inquiry = InquiryService::create(state.db(), payload, ip).await?;
    Ok((
        StatusCode::CREATED,
        Json(InquiryReceivedResponse {
            id: inquiry.id,
            message: "Thanks, we'll get back to you soon".to_string(),
        }),
    ))
}

/// List inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<ListInquiriesQuery>,
) -> AppResult<Json<InquiriesListResponse>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            InquiryStatus::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", raw)))?,
        ),
        None => None,
    };

    let inquiries =
        InquiryService::list(state.db(), status, Page::new(query.page, query.per_page)).await?;
    Ok(Json(inquiries))
}

/// Mark an inquiry as handled
pub async fn resolve_inquiry(
    State(state): State<AppState>,
    admin: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InquiryResponse>> {
    let inquiry = InquiryService::resolve(state.db(), &id, &admin).await?;
    Ok(Json(inquiry))
}
