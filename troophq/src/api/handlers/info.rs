use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema, utoipa::ToResponse)]
pub struct ServerInfo {
    pub app_name: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/info",
    responses(
        (status = 200, response = inline(ServerInfo))
    )
)]
pub async fn info_handler() -> impl IntoResponse {
    Json(ServerInfo {
        app_name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
