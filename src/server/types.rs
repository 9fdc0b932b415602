use crate::content::ContentRecord;
use crate::lang::LanguageCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentLanguageResponse {
    pub language: LanguageCode,
    pub supported: Vec<LanguageCode>,
    #[serde(rename = "default")]
    pub default_language: LanguageCode,
}

/// Body of `POST /api/language`. The code stays a plain string here so an
/// unsupported value reaches validation and gets the 400 with the supported
/// set instead of a bare deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLanguageResponse {
    pub success: bool,
    pub language: LanguageCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidLanguageResponse {
    pub error: String,
    pub supported: Vec<LanguageCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub language: LanguageCode,
    pub content: ContentRecord,
    /// RFC 3339 timestamp of when the response was produced.
    pub timestamp: String,
}
