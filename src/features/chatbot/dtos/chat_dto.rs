use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::features::chatbot::models::{ChatAssistReply, ChatStartReply, SuggestedAction};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatMessageRequestDto {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    #[schema(example = "Which sub-district needs a clinic first?")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReplyDto {
    pub bot_response: String,
    pub suggested_actions: Vec<SuggestedAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub recent_simulations: Vec<Value>,
}

impl From<ChatStartReply> for ChatReplyDto {
    fn from(reply: ChatStartReply) -> Self {
        Self {
            bot_response: reply.bot_response,
            suggested_actions: reply.suggested_actions,
            recent_simulations: reply.recent_simulations,
        }
    }
}

impl From<ChatAssistReply> for ChatReplyDto {
    fn from(reply: ChatAssistReply) -> Self {
        Self {
            bot_response: reply.bot_response,
            suggested_actions: reply.suggested_actions,
            recent_simulations: Vec::new(),
        }
    }
}
