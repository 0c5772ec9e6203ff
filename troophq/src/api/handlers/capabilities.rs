use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use troophq_core::authorization::{Capability, CapabilityInfo};

/// The capability catalog, consumed read-only by permission-editing screens
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema, utoipa::ToResponse)]
pub struct CapabilityCatalogResponse {
    pub capabilities: Vec<CapabilityInfo>,
}

#[utoipa::path(
    get,
    path = "/api/v1/authenticated/capabilities",
    responses(
        (status = 200, response = inline(CapabilityCatalogResponse)),
        (status = 401, description = "Session token is missing or invalid"),
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_capabilities_handler() -> impl IntoResponse {
    Json(CapabilityCatalogResponse {
        capabilities: Capability::all().iter().map(Capability::info).collect(),
    })
}
