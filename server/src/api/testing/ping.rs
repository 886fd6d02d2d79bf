use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Health check response", body = PingResponse)
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(PingResponse {
        message: "ping".to_string(),
    })
}
