pub mod analysis;
pub mod app_sessions;
pub mod auth;
pub mod chatbot;
pub mod map;
pub mod pages;
pub mod regions;
pub mod reports;
pub mod simulation;
