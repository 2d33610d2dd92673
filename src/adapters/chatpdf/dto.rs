//! Wire types for the ChatPDF-compatible API.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::SourceCitation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddFileResponse {
    pub source_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChatRequest<'a> {
    pub source_id: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub content: String,
    /// Kept untyped so an unexpected entry cannot discard the reply.
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
}

impl ChatResponse {
    /// Entries that read as citations; anything else is skipped.
    pub fn citations(&self) -> Vec<SourceCitation> {
        self.sources
            .iter()
            .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                Ok(citation) => Some(citation),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unrecognized source entry");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteRequest<'a> {
    pub sources: [&'a str; 1],
}
