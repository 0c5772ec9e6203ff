use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use troophq_core::authorization::{Capability, CapabilityCategory, Scope};

use crate::api::basic_auth::CurrentUser;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScopeGrant {
    pub capability: String,
    pub display_name: String,
    pub category: CapabilityCategory,
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema, utoipa::ToResponse)]
pub struct UserScopesResponse {
    pub email: String,
    pub roles: Vec<String>,
    pub scopes: Vec<ScopeGrant>,
}

#[utoipa::path(
    get,
    path = "/api/v1/authenticated/scopes",
    responses(
        (status = 200, response = inline(UserScopesResponse)),
        (status = 401, description = "Session token is missing or invalid"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_user_scopes_handler(
    State(state): State<SharedAppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Fetching effective scopes for user: {}", user.email);

    let scopes = Capability::all()
        .into_iter()
        .map(|capability| ScopeGrant {
            capability: capability.as_str().to_string(),
            display_name: capability.display_name().to_string(),
            category: capability.category(),
            scope: state.privileges.effective_scope(&user.roles, capability),
        })
        .collect();

    Ok(Json(UserScopesResponse {
        email: user.email,
        roles: user.roles,
        scopes,
    }))
}
