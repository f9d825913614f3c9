use anyhow::Result;

use super::sendmail::send_email;
use crate::config::Config;

/// The raw token goes into the link; only its digest is stored server side.
pub async fn send_verification_email(
    config: &Config,
    to_email: &str,
    name: &str,
    token: &str,
) -> Result<()> {
    let subject = "Verify your email";
    let template_path = "src/mail/templates/Verification-email.html";
    let verification_link = format!("{}/api/auth/verify-email/{}", config.app_url, token);
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{verification_link}}".to_string(), verification_link),
    ];

    send_email(config, to_email, subject, template_path, &placeholders).await
}

pub async fn send_welcome_email(
    config: &Config,
    to_email: &str,
    name: &str,
) -> Result<()> {
    let subject = "Welcome to Casamart";
    let template_path = "src/mail/templates/Welcome-email.html";
    let placeholders = vec![("{{name}}".to_string(), name.to_string())];

    send_email(config, to_email, subject, template_path, &placeholders).await
}

pub async fn send_forgot_password_email(
    config: &Config,
    to_email: &str,
    name: &str,
    token: &str,
) -> Result<()> {
    let subject = "Reset your password";
    let template_path = "src/mail/templates/ResetPassword-email.html";
    let reset_link = format!("{}/reset-password?token={}", config.frontend_url, token);
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{reset_link}}".to_string(), reset_link),
    ];

    send_email(config, to_email, subject, template_path, &placeholders).await
}
