use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentItemType {
    Product,
    Property,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    /// Major currency units; converted to minor units for the gateway
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i64,

    pub item_type: PaymentItemType,
    pub item_id: Uuid,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentDto {
    #[validate(length(min = 1, message = "Reference is required"))]
    pub reference: String,

    pub item_type: PaymentItemType,
    pub item_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitiatePaymentResponseDto {
    pub status: String,
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}
