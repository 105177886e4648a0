use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::chatbot::handlers;
use crate::features::chatbot::services::ChatbotService;

/// Create routes for the chatbot feature
pub fn routes(service: Arc<ChatbotService>) -> Router {
    Router::new()
        .route("/api/chatbot/start", post(handlers::start_chat))
        .route("/api/chatbot/assist", post(handlers::assist))
        .with_state(service)
}
