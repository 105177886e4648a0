mod chat_handler;

pub use chat_handler::{__path_assist, __path_start_chat, assist, start_chat};
