use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    db::UserExt,
    dtos::userdtos::{
        FilterUserDto, ForgotPasswordRequestDto, LoginUserDto, RegisterUserDto,
        ResendVerificationEmailDto, ResetPasswordRequestDto, Response, UserData, UserLoginResponseDto,
        UserResponseDto,
    },
    error::{ErrorMessage, HttpError},
    mail::mails::{send_forgot_password_email, send_verification_email, send_welcome_email},
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-email/:token", get(verify_email))
        .route("/resend-verification", post(resend_verification))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing_user = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let verification_token = token::generate_one_time_token();
    let token_expires_at = Utc::now() + Duration::hours(24);

    let user = app_state
        .db_client
        .save_user(
            body.name,
            body.email,
            hashed_password,
            token::digest_token(&verification_token),
            token_expires_at,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Best effort: a failed send must not roll back the registration
    if let Err(e) =
        send_verification_email(&app_state.env, &user.email, &user.name, &verification_token).await
    {
        tracing::warn!("Failed to send verification email to {}: {}", user.email, e);
    }

    let filtered_user = FilterUserDto::filter_user(&user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user =
        result.ok_or(HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    if !user.verified {
        let body = Json(serde_json::json!({
            "status": "fail",
            "message": "Please verify your email before logging in",
            "needsVerification": true,
        }));
        return Ok((StatusCode::UNAUTHORIZED, body).into_response());
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
    });

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn verify_email(
    Path(raw_token): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let digest = token::digest_token(&raw_token);

    let result = app_state
        .db_client
        .get_user(None, None, Some(&digest))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    if let Some(expires_at) = user.token_expires_at {
        if Utc::now() > expires_at {
            return Err(HttpError::bad_request(
                "Verification token has expired".to_string(),
            ));
        }
    } else {
        return Err(HttpError::bad_request(
            "Invalid verification token".to_string(),
        ));
    }

    app_state
        .db_client
        .mark_email_verified(&digest)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Err(e) = send_welcome_email(&app_state.env, &user.email, &user.name).await {
        tracing::warn!("Failed to send welcome email to {}: {}", user.email, e);
    }

    Ok(Json(Response {
        status: "success",
        message: "Email verified successfully. You can now log in.".to_string(),
    }))
}

pub async fn resend_verification(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResendVerificationEmailDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::not_found("Email not found".to_string()))?;

    if user.verified {
        return Err(HttpError::bad_request("Email is already verified".to_string()));
    }

    let verification_token = token::generate_one_time_token();
    let token_expires_at = Utc::now() + Duration::hours(24);

    app_state
        .db_client
        .set_verification_token(
            user.id,
            &token::digest_token(&verification_token),
            token_expires_at,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    send_verification_email(&app_state.env, &user.email, &user.name, &verification_token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Verification email has been resent.".to_string(),
    }))
}

pub async fn forgot_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ForgotPasswordRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user(None, Some(&body.email), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::bad_request("Email not found!".to_string()))?;

    let reset_token = token::generate_one_time_token();
    let expires_at = Utc::now() + Duration::minutes(30);

    app_state
        .db_client
        .set_verification_token(user.id, &token::digest_token(&reset_token), expires_at)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Err(e) =
        send_forgot_password_email(&app_state.env, &user.email, &user.name, &reset_token).await
    {
        tracing::error!("Failed to send password reset email to {}: {}", user.email, e);
        return Err(HttpError::server_error("Failed to send email".to_string()));
    }

    Ok(Json(Response {
        status: "success",
        message: "Password reset link has been sent to your email.".to_string(),
    }))
}

pub async fn reset_password(
    Path(raw_token): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResetPasswordRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let digest = token::digest_token(&raw_token);

    let result = app_state
        .db_client
        .get_user(None, None, Some(&digest))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = result.ok_or(HttpError::bad_request("Invalid or expired token".to_string()))?;

    if let Some(expires_at) = user.token_expires_at {
        if Utc::now() > expires_at {
            return Err(HttpError::bad_request(
                "Reset token has expired".to_string(),
            ));
        }
    } else {
        return Err(HttpError::bad_request("Invalid reset token".to_string()));
    }

    let hashed_password =
        password::hash(&body.new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(user.id, hashed_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .clear_verification_token(user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Password has been successfully reset.".to_string(),
    }))
}
