use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reports::models::ExportReply;

/// Export options; the report content comes from the session's latest results
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ExportRequestDto {
    /// Output format, `pdf` when omitted
    #[validate(length(min = 1, max = 10, message = "Format must be 1-10 characters"))]
    #[schema(example = "pdf")]
    pub format: Option<String>,
}

impl ExportRequestDto {
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or("pdf")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportResponseDto {
    pub filename: String,
    /// Absolute link to the generated file
    pub download_url: String,
    pub file_size_bytes: u64,
    pub generated_at: Option<String>,
}

impl From<ExportReply> for ExportResponseDto {
    fn from(reply: ExportReply) -> Self {
        Self {
            filename: reply.filename,
            download_url: reply.download_url,
            file_size_bytes: reply.file_size_bytes,
            generated_at: reply.generated_at,
        }
    }
}
