use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /reports/export`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub report_type: &'static str,
    /// Last simulation result, else last priority ranking, else `{}`
    pub data: Value,
    pub format: String,
}

/// Backend answer to an export; `download_url` may be relative
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportReply {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub file_size_bytes: u64,
    #[serde(default)]
    pub generated_at: Option<String>,
}
