use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum ErrorMessage {
    #[error("Email or password is wrong")]
    WrongCredentials,
    #[error("An account with this email already exists")]
    EmailExist,
    #[error("User belonging to this token no longer exists")]
    UserNoLongerExist,
    #[error("Password cannot be empty")]
    EmptyPassword,
    #[error("Password must not be more than {0} characters")]
    ExceededMaxPasswordLength(usize),
    #[error("Error while hashing password")]
    HashingError,
    #[error("Invalid password hash format")]
    InvalidHashFormat,
    #[error("Authentication token is invalid or expired")]
    InvalidToken,
    #[error("You are not logged in, please provide a token")]
    TokenNotProvided,
    #[error("You are not allowed to perform this action")]
    PermissionDenied,
    #[error("User is not authenticated")]
    UserNotAuthenticated,
    #[error("Server error. Please try again later")]
    ServerError,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::FORBIDDEN)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND)
    }

    pub fn unique_constraint_violation(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::CONFLICT)
    }

    pub fn into_http_response(self) -> axum::response::Response {
        let json_response = Json(ErrorResponse {
            status: "fail".to_string(),
            message: self.message.clone(),
        });

        (self.status, json_response).into_response()
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

/// Normalize database error shapes into client-facing statuses: unique and
/// foreign key violations become 400s, a missing row becomes 404, everything
/// else surfaces as 500.
pub fn map_sqlx_error(err: sqlx::Error, entity: &str) -> HttpError {
    match &err {
        sqlx::Error::RowNotFound => HttpError::not_found(format!("{} not found", entity)),
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                HttpError::bad_request(format!("{} already exists", entity))
            } else if db_err.is_foreign_key_violation() {
                HttpError::bad_request(format!("Referenced {} does not exist", entity))
            } else {
                HttpError::server_error(err.to_string())
            }
        }
        _ => HttpError::server_error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_404() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "Product");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found");
    }

    #[test]
    fn error_message_display() {
        assert_eq!(
            ErrorMessage::ExceededMaxPasswordLength(64).to_string(),
            "Password must not be more than 64 characters"
        );
    }
}
