use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde_json::json;
use validator::Validate;

use crate::{
    db::{
        transactiondb::NewTransaction, ProductExt, PropertyExt, TransactionExt,
    },
    dtos::paymentdtos::{
        InitiatePaymentDto, InitiatePaymentResponseDto, PaymentItemType, VerifyPaymentDto,
    },
    error::{map_sqlx_error, HttpError},
    middleware::JWTAuthMiddeware,
    models::transactionmodel::TransactionStatus,
    service::payment_provider::PaymentProviderService,
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/initiate", post(initiate_payment))
        .route("/verify", post(verify_payment))
}

fn generate_reference() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..16).map(|_| rng.sample(Alphanumeric) as char).collect();
    format!("CSM-{}", suffix)
}

/// Reject references to items that cannot be paid for.
async fn check_item(
    app_state: &AppState,
    item_type: PaymentItemType,
    item_id: uuid::Uuid,
) -> Result<(), HttpError> {
    match item_type {
        PaymentItemType::Product => {
            let product = app_state
                .db_client
                .get_product(item_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or_else(|| HttpError::not_found("Product not found".to_string()))?;

            if !product.published || product.stock <= 0 {
                return Err(HttpError::bad_request(
                    "Product is not available for purchase".to_string(),
                ));
            }
        }
        PaymentItemType::Property => {
            app_state
                .db_client
                .get_property(item_id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?
                .ok_or_else(|| HttpError::not_found("Property not found".to_string()))?;
        }
    }
    Ok(())
}

pub async fn initiate_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<InitiatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    check_item(&app_state, body.item_type, body.item_id).await?;

    let reference = generate_reference();
    let amount_minor = body.amount * 100;
    let callback_url = format!("{}/payment/callback", app_state.env.frontend_url);
    let metadata = json!({
        "item_type": body.item_type,
        "item_id": body.item_id,
    });

    let payment_service = PaymentProviderService::new(&app_state.env);
    let init = payment_service
        .initialize_payment(
            &body.email,
            amount_minor,
            &reference,
            &callback_url,
            Some(metadata),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(InitiatePaymentResponseDto {
        status: "success".to_string(),
        authorization_url: init.authorization_url,
        access_code: init.access_code,
        reference: init.reference,
    }))
}

pub async fn verify_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth_user): Extension<JWTAuthMiddeware>,
    Json(body): Json<VerifyPaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Idempotency short-circuit: a settled reference is returned as stored,
    // with no second gateway call. A pending one is re-verified below.
    let existing = app_state
        .db_client
        .get_transaction_by_reference(&body.reference)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(transaction) = &existing {
        if transaction.status.is_terminal() {
            return Ok(Json(json!({
                "status": "success",
                "data": { "transaction": transaction }
            })));
        }
    }

    let payment_service = PaymentProviderService::new(&app_state.env);
    let verification = payment_service
        .verify_payment(&body.reference)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let status = TransactionStatus::from_gateway_status(&verification.status);

    let transaction = match existing {
        Some(_) => app_state
            .db_client
            .update_transaction_status(&body.reference, status, verification.raw)
            .await
            .map_err(|e| map_sqlx_error(e, "Transaction"))?,
        None => {
            let (product_id, property_id) = match body.item_type {
                PaymentItemType::Product => (Some(body.item_id), None),
                PaymentItemType::Property => (None, Some(body.item_id)),
            };

            app_state
                .db_client
                .save_transaction(NewTransaction {
                    reference: verification.reference,
                    user_id: auth_user.user.id,
                    amount: verification.amount,
                    status,
                    product_id,
                    property_id,
                    gateway_response: verification.raw,
                })
                .await
                .map_err(|e| map_sqlx_error(e, "Transaction"))?
        }
    };

    Ok(Json(json!({
        "status": "success",
        "data": { "transaction": transaction }
    })))
}
