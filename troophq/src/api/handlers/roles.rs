use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema, utoipa::ToResponse)]
pub struct RoleListResponse {
    pub roles: Vec<RoleInfo>,
}

#[utoipa::path(
    get,
    path = "/api/v1/authenticated/roles",
    responses(
        (status = 200, response = inline(RoleListResponse)),
        (status = 401, description = "Session token is missing or invalid"),
        (status = 403, description = "Insufficient privilege - manage_settings required"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_roles_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    let roles = state
        .privileges
        .roles()
        .into_iter()
        .map(|(name, description)| RoleInfo { name, description })
        .collect();

    Ok(Json(RoleListResponse { roles }))
}
