use axum::{debug_handler, extract::State, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::basic_auth::CurrentUser;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub roles: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, returns a session token"),
        (status = 401, description = "Invalid email or password"),
        (status = 429, description = "Identifier locked out after too many failed attempts"),
    )
)]
#[debug_handler]
pub async fn login_handler(
    State(state): State<SharedAppState>,
    Json(form): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    // the lockout guard keys on the submitted email, lowercased
    let identifier = form.email.trim().to_lowercase();

    if state.login_guard.is_locked(&identifier) {
        warn!("Login attempt for locked out identifier '{}'", identifier);
        return Err(AppError::TooManyLoginAttempts);
    }

    let Some(account) = state.settings.api.users.get(&identifier) else {
        state.login_guard.record_failure(&identifier);
        debug!("Login failed for unknown account '{}'", identifier);
        return Err(AppError::InvalidCredentials);
    };

    let verified = bcrypt::verify(&form.password, &account.password_hash).unwrap_or(false);
    if !verified {
        state.login_guard.record_failure(&identifier);
        debug!("Login failed for '{}'", identifier);
        return Err(AppError::InvalidCredentials);
    }

    state.login_guard.clear_record(&identifier);

    let session = state
        .sessions
        .create(&identifier, &account.name, account.roles.clone());

    info!("User {} logged in with roles {:?}", identifier, session.roles);

    Ok(Json(LoginResponse {
        token: session.token,
        name: session.name,
        roles: session.roles,
        expires_at: session.expires_at.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/authenticated/logout",
    responses(
        (status = 200, description = "Session removed"),
        (status = 401, description = "Session token is missing or invalid"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn logout_handler(
    State(state): State<SharedAppState>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    state.sessions.remove(&user.token);
    info!("User {} logged out", user.email);

    Json(serde_json::json!({ "status": "success" }))
}
