mod page_handler;

pub use page_handler::{__path_get_error_page, fallback, get_error_page};
