use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, CurrentSession};
use crate::features::auth::model::SessionUser;
use crate::features::chatbot::dtos::{ChatMessageRequestDto, ChatReplyDto};
use crate::features::chatbot::models::{
    AssistRequest, ChatMessage, SessionContext, SimulationDigest,
};
use crate::features::chatbot::services::ChatbotService;
use crate::shared::types::ApiResponse;

/// Open a conversation with the assistant. Clears the session's chat history.
#[utoipa::path(
    post,
    path = "/api/chatbot/start",
    responses(
        (status = 200, description = "Assistant greeting", body = ApiResponse<ChatReplyDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "chatbot",
    security(("session_cookie" = []))
)]
pub async fn start_chat(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<ChatbotService>>,
) -> Result<Json<ApiResponse<ChatReplyDto>>> {
    let credentials = session.credentials().await;
    let reply = session
        .observe(service.start_chat(&credentials).await)
        .await?;

    {
        let mut workspace = session.workspace_mut().await;
        workspace.clear_chat();
        workspace.push_chat(ChatMessage::assistant(reply.bot_response.clone()));
    }

    Ok(Json(ApiResponse::success(Some(reply.into()), None, None)))
}

/// Ask the assistant. The latest simulation and earlier messages are sent along
/// as context.
#[utoipa::path(
    post,
    path = "/api/chatbot/assist",
    request_body = ChatMessageRequestDto,
    responses(
        (status = 200, description = "Assistant reply", body = ApiResponse<ChatReplyDto>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Empty or oversized message")
    ),
    tag = "chatbot",
    security(("session_cookie" = []))
)]
pub async fn assist(
    _user: SessionUser,
    CurrentSession(session): CurrentSession,
    State(service): State<Arc<ChatbotService>>,
    AppJson(dto): AppJson<ChatMessageRequestDto>,
) -> Result<Json<ApiResponse<ChatReplyDto>>> {
    dto.validate()?;

    let request = {
        let workspace = session.workspace().await;
        AssistRequest {
            user_message: dto.message.clone(),
            session_context: SessionContext {
                last_simulation_result: workspace.last_simulation.as_ref().map(SimulationDigest::from),
                previous_messages: workspace.chat_history(),
            },
        }
    };

    let credentials = session.credentials().await;
    let reply = session
        .observe(service.assist(&request, &credentials).await)
        .await?;

    {
        let mut workspace = session.workspace_mut().await;
        workspace.push_chat(ChatMessage::user(dto.message));
        workspace.push_chat(ChatMessage::assistant(reply.bot_response.clone()));
    }

    Ok(Json(ApiResponse::success(Some(reply.into()), None, None)))
}
