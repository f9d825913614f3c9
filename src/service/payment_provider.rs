// service/payment_provider.rs
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::Config;

const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentInitResponse {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayVerification {
    pub status: String,
    pub amount: i64,
    pub reference: String,
    /// Full verify payload as the gateway returned it
    pub raw: JsonValue,
}

pub struct PaymentProviderService {
    secret_key: String,
}

impl PaymentProviderService {
    pub fn new(config: &Config) -> Self {
        Self {
            secret_key: config.paystack_secret_key.clone(),
        }
    }

    /// Initialize a checkout session. `amount` is already in minor currency
    /// units; the returned authorization URL is where the client redirects
    /// the browser.
    pub async fn initialize_payment(
        &self,
        email: &str,
        amount: i64,
        reference: &str,
        callback_url: &str,
        metadata: Option<JsonValue>,
    ) -> Result<PaymentInitResponse> {
        let client = reqwest::Client::new();
        let payload = serde_json::json!({
            "email": email,
            "amount": amount,
            "reference": reference,
            "callback_url": callback_url,
            "metadata": metadata.unwrap_or(serde_json::json!({})),
        });

        let response = client
            .post(format!("{}/transaction/initialize", PAYSTACK_BASE_URL))
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let response_body: JsonValue = response.json().await?;

        if response_body["status"].as_bool().unwrap_or(false) {
            let data = &response_body["data"];
            Ok(PaymentInitResponse {
                authorization_url: data["authorization_url"].as_str().unwrap_or("").to_string(),
                access_code: data["access_code"].as_str().unwrap_or("").to_string(),
                reference: data["reference"].as_str().unwrap_or(reference).to_string(),
            })
        } else {
            Err(anyhow!(
                "{}",
                response_body["message"]
                    .as_str()
                    .unwrap_or("Payment initialization failed")
            ))
        }
    }

    pub async fn verify_payment(&self, reference: &str) -> Result<GatewayVerification> {
        let client = reqwest::Client::new();
        let url = format!("{}/transaction/verify/{}", PAYSTACK_BASE_URL, reference);

        let response = client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .send()
            .await?;

        let response_body: JsonValue = response.json().await?;

        if response_body["status"].as_bool().unwrap_or(false) {
            let data = &response_body["data"];
            Ok(GatewayVerification {
                status: data["status"].as_str().unwrap_or("pending").to_string(),
                amount: data["amount"].as_i64().unwrap_or(0),
                reference: data["reference"].as_str().unwrap_or(reference).to_string(),
                raw: data.clone(),
            })
        } else {
            Err(anyhow!(
                "{}",
                response_body["message"]
                    .as_str()
                    .unwrap_or("Payment verification failed")
            ))
        }
    }
}
