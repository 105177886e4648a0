mod export_handler;

pub use export_handler::{__path_export_report, export_report};
