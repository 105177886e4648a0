//! Planning assistant. Conversation history lives in the app session and is
//! bounded to the most recent messages.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/chatbot/start` | Start a conversation |
//! | POST | `/api/chatbot/assist` | Send a message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ChatbotService;
