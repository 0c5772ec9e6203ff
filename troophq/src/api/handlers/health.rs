use axum::{response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "success" }))
}
