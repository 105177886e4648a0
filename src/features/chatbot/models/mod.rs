mod chat;

pub use chat::{
    AssistRequest, ChatAssistReply, ChatMessage, ChatRole, ChatStartReply, SessionContext,
    SimulationDigest, SuggestedAction,
};
