// db/transactiondb.rs
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::transactionmodel::{Transaction, TransactionStatus};

const TRANSACTION_COLUMNS: &str = r#"
    id, reference, user_id, amount, status, product_id, property_id,
    gateway_response, created_at, updated_at
"#;

pub struct NewTransaction {
    pub reference: String,
    pub user_id: Uuid,
    pub amount: i64,
    pub status: TransactionStatus,
    pub product_id: Option<Uuid>,
    pub property_id: Option<Uuid>,
    pub gateway_response: JsonValue,
}

#[async_trait]
pub trait TransactionExt {
    async fn get_transaction_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, sqlx::Error>;

    async fn save_transaction(&self, data: NewTransaction)
        -> Result<Transaction, sqlx::Error>;

    /// Reconcile a pending row after a later gateway verify.
    async fn update_transaction_status(
        &self,
        reference: &str,
        status: TransactionStatus,
        gateway_response: JsonValue,
    ) -> Result<Transaction, sqlx::Error>;

    async fn get_transactions_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Transaction>, sqlx::Error>;
}

#[async_trait]
impl TransactionExt for DBClient {
    async fn get_transaction_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {} FROM transactions WHERE reference = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_transaction(
        &self,
        data: NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (
                reference, user_id, amount, status,
                product_id, property_id, gateway_response
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(data.reference)
        .bind(data.user_id)
        .bind(data.amount)
        .bind(data.status)
        .bind(data.product_id)
        .bind(data.property_id)
        .bind(data.gateway_response)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_transaction_status(
        &self,
        reference: &str,
        status: TransactionStatus,
        gateway_response: JsonValue,
    ) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions
            SET status = $2, gateway_response = $3, updated_at = NOW()
            WHERE reference = $1
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(reference)
        .bind(status)
        .bind(gateway_response)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_transactions_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {} FROM transactions WHERE user_id = $1 ORDER BY created_at DESC",
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
