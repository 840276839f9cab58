//! Inquiry request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_INQUIRY_MESSAGE_LENGTH;

/// Contact form submission
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = MAX_INQUIRY_MESSAGE_LENGTH))]
    pub message: String,
}

/// Inbox query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListInquiriesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
}
