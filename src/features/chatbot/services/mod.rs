mod chatbot_service;

pub use chatbot_service::ChatbotService;
