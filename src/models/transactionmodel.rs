use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transaction_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn to_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Map the gateway's reported status onto ours. Anything the gateway
    /// has not settled stays pending so a later verify can reconcile it.
    pub fn from_gateway_status(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "success" => TransactionStatus::Success,
            "failed" | "abandoned" | "reversed" => TransactionStatus::Failed,
            _ => TransactionStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Transaction {
    pub id: Uuid,

    // Gateway reference, unique, doubles as the verify idempotency key
    pub reference: String,

    pub user_id: Uuid,

    // Minor currency units
    pub amount: i64,

    pub status: TransactionStatus,

    pub product_id: Option<Uuid>,
    pub property_id: Option<Uuid>,

    // Raw gateway verify payload
    pub gateway_response: JsonValue,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_status_mapping() {
        assert_eq!(
            TransactionStatus::from_gateway_status("success"),
            TransactionStatus::Success
        );
        assert_eq!(
            TransactionStatus::from_gateway_status("Abandoned"),
            TransactionStatus::Failed
        );
        assert_eq!(
            TransactionStatus::from_gateway_status("ongoing"),
            TransactionStatus::Pending
        );
    }

    #[test]
    fn only_pending_is_not_terminal() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }
}
