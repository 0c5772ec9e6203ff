use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Clone, Error, Debug, utoipa::ToResponse, utoipa::ToSchema)]
pub enum AppError {
    /// The identifier is locked out; terminal for the request, the client
    /// has to wait for the lockout window to pass
    #[error("Too many failed login attempts, try again later")]
    TooManyLoginAttempts,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Insufficient privilege: {0}")]
    InsufficientPrivilege(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn get_error_msg(&self) -> (StatusCode, String) {
        let status = match self {
            AppError::TooManyLoginAttempts => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InsufficientPrivilege(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(app_error) = e.downcast_ref::<AppError>() {
            return app_error.clone();
        }
        AppError::InternalServerError(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.get_error_msg();
        let body = serde_json::json!({ "error": true, "message": body });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_the_auth_contract() {
        assert_eq!(
            AppError::TooManyLoginAttempts.get_error_msg().0,
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::InvalidCredentials.get_error_msg().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InsufficientPrivilege("manage_troop".to_string())
                .get_error_msg()
                .0,
            StatusCode::FORBIDDEN
        );
    }
}
