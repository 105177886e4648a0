mod export;

pub use export::{ExportReply, ExportRequest};
