use std::fs;

use anyhow::{bail, Result};
use serde_json::json;

use crate::config::Config;

pub async fn send_email(
    config: &Config,
    to_email: &str,
    subject: &str,
    template_path: &str,
    placeholders: &[(String, String)],
) -> Result<()> {
    if to_email.is_empty() {
        bail!("Email recipient cannot be empty");
    }
    if !to_email.contains('@') {
        bail!("Invalid email address: {}", to_email);
    }

    let mut html_template = match fs::read_to_string(template_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read email template {}: {}", template_path, e);
            bail!("Template not found: {}", template_path);
        }
    };

    for (key, value) in placeholders {
        html_template = html_template.replace(key, value);
    }

    send_via_resend(config, to_email, subject, &html_template).await
}

async fn send_via_resend(
    config: &Config,
    to_email: &str,
    subject: &str,
    html_body: &str,
) -> Result<()> {
    if config.resend_api_key.is_empty() {
        bail!("RESEND_API_KEY is not configured");
    }

    let client = reqwest::Client::new();
    let request_body = json!({
        "from": config.from_email,
        "to": to_email,
        "subject": subject,
        "html": html_body,
    });

    let response = client
        .post("https://api.resend.com/emails")
        .header("Authorization", format!("Bearer {}", config.resend_api_key))
        .header("Content-Type", "application/json")
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .unwrap_or_else(|_| "No response body".to_string());

    if status.is_success() {
        tracing::info!("Email sent to {}", to_email);
        Ok(())
    } else {
        bail!("Resend API error ({}): {}", status.as_u16(), response_text)
    }
}
