use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::features::simulation::models::SimulationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Follow-up the assistant proposes to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuggestedAction {
    pub action_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub parameters: Option<Value>,
}

/// Backend answer to `POST /chatbot/start_chat`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatStartReply {
    #[serde(default)]
    pub bot_response: String,
    #[serde(default)]
    pub recent_simulations: Vec<Value>,
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
}

/// Backend answer to `POST /chatbot/assist`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatAssistReply {
    #[serde(default)]
    pub bot_response: String,
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
}

/// The parts of the last simulation the assistant is told about
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationDigest {
    pub regency_name: String,
    pub budget_used: f64,
    pub facilities_recommended: usize,
    pub coverage_percentage: f64,
}

impl From<&SimulationResult> for SimulationDigest {
    fn from(result: &SimulationResult) -> Self {
        Self {
            regency_name: result.regency_name.clone(),
            budget_used: result.budget_used,
            facilities_recommended: result.facilities_recommended,
            coverage_percentage: result.coverage_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionContext {
    pub last_simulation_result: Option<SimulationDigest>,
    pub previous_messages: Vec<ChatMessage>,
}

/// Body of `POST /chatbot/assist`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistRequest {
    pub user_message: String,
    pub session_context: SessionContext,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assist_request_without_simulation() {
        let request = AssistRequest {
            user_message: "Where should we build next?".to_string(),
            session_context: SessionContext {
                last_simulation_result: None,
                previous_messages: vec![
                    ChatMessage::user("Hi"),
                    ChatMessage::assistant("Hello, I am Ceeva"),
                ],
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user_message": "Where should we build next?",
                "session_context": {
                    "last_simulation_result": null,
                    "previous_messages": [
                        {"role": "user", "content": "Hi"},
                        {"role": "assistant", "content": "Hello, I am Ceeva"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_start_reply_tolerates_missing_members() {
        let reply: ChatStartReply =
            serde_json::from_value(json!({"bot_response": "Halo!"})).unwrap();
        assert_eq!(reply.bot_response, "Halo!");
        assert!(reply.suggested_actions.is_empty());
    }
}
