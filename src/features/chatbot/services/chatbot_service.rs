use std::sync::Arc;

use serde_json::Value;

use crate::features::chatbot::models::{AssistRequest, ChatAssistReply, ChatStartReply};
use crate::modules::backend::{BackendAuth, BackendClient, BackendResult};

/// Planning assistant ("Ceeva") hosted by the backend
pub struct ChatbotService {
    backend: Arc<BackendClient>,
}

impl ChatbotService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    pub async fn start_chat(&self, auth: &BackendAuth) -> BackendResult<ChatStartReply> {
        self.backend
            .post::<Value, _>("/chatbot/start_chat", None, auth)
            .await
    }

    pub async fn assist(
        &self,
        request: &AssistRequest,
        auth: &BackendAuth,
    ) -> BackendResult<ChatAssistReply> {
        tracing::debug!(
            "Assistant request with {} previous messages",
            request.session_context.previous_messages.len()
        );
        self.backend
            .post("/chatbot/assist", Some(request), auth)
            .await
    }
}
