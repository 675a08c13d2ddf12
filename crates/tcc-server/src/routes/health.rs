use axum::Json;
use tcc_core::responses::MessageResponse;

pub const HEALTH_MESSAGE: &str = "TCC Backend API is running!";

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new(HEALTH_MESSAGE))
}
