//! Vendor-side document handles and replies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Vendor-assigned opaque handle identifying an uploaded document.
///
/// Every chat call on a conversation carries its source id explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a SourceId, rejecting blank handles.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("source_id"));
        }
        Ok(Self(id))
    }

    /// Returns the raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A passage reference returned alongside a vendor reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A reply from the document vendor.
///
/// # Invariants
///
/// - `content` is non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    content: String,
    citations: Vec<SourceCitation>,
}

impl AssistantReply {
    /// Creates a reply, rejecting blank content.
    pub fn new(
        content: impl Into<String>,
        citations: Vec<SourceCitation>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self { content, citations })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn citations(&self) -> &[SourceCitation] {
        &self.citations
    }

    pub(crate) fn into_parts(self) -> (String, Vec<SourceCitation>) {
        (self.content, self.citations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_rejects_blank() {
        assert!(SourceId::new("").is_err());
        assert!(SourceId::new("  ").is_err());
    }

    #[test]
    fn source_id_keeps_vendor_value() {
        let id = SourceId::new("src_123").unwrap();
        assert_eq!(id.as_str(), "src_123");
        assert_eq!(id.to_string(), "src_123");
    }

    #[test]
    fn reply_rejects_blank_content() {
        assert!(AssistantReply::new("\n\t", vec![]).is_err());
    }

    #[test]
    fn citation_omits_missing_url() {
        let citation = SourceCitation {
            id: "p1".to_string(),
            name: "report.pdf".to_string(),
            url: None,
        };
        let json = serde_json::to_string(&citation).unwrap();
        assert!(!json.contains("url"));
    }

    #[test]
    fn citation_deserializes_without_url() {
        let citation: SourceCitation =
            serde_json::from_str(r#"{"id":"p1","name":"report.pdf"}"#).unwrap();
        assert_eq!(citation.url, None);
    }
}
