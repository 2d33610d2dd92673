//! Preview registry - scoped, revocable handles to uploaded PDFs.
//!
//! Each user holds at most one preview: the last uploaded file. Publishing a
//! new one revokes the previous handle, and handles can be revoked when the
//! conversation they belong to is deleted or the user starts over.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::document::PdfUpload;
use crate::domain::foundation::{ConversationId, PreviewId, UserId};

/// A published preview.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub id: PreviewId,
    pub conversation_id: ConversationId,
    pub file_name: String,
    pub bytes: Arc<Vec<u8>>,
}

/// Per-user preview handles.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    previews: Mutex<HashMap<UserId, PreviewFile>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, PreviewFile>> {
        self.previews.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `file` as the user's preview, revoking any previous one.
    pub fn publish(
        &self,
        user_id: &UserId,
        conversation_id: ConversationId,
        file: &PdfUpload,
    ) -> PreviewId {
        let preview = PreviewFile {
            id: PreviewId::new(),
            conversation_id,
            file_name: file.file_name().to_string(),
            bytes: Arc::new(file.bytes().to_vec()),
        };
        let id = preview.id;

        if let Some(old) = self.lock().insert(user_id.clone(), preview) {
            tracing::debug!(preview_id = %old.id, "Preview superseded");
        }
        id
    }

    /// Returns the preview if `id` is the user's current handle.
    pub fn get(&self, user_id: &UserId, id: &PreviewId) -> Option<PreviewFile> {
        self.lock()
            .get(user_id)
            .filter(|preview| preview.id == *id)
            .cloned()
    }

    /// Revokes the user's preview. Returns whether one existed.
    pub fn revoke(&self, user_id: &UserId) -> bool {
        self.lock().remove(user_id).is_some()
    }

    /// Revokes the user's preview only if `id` is its current handle.
    pub fn revoke_handle(&self, user_id: &UserId, id: &PreviewId) -> bool {
        let mut previews = self.lock();
        match previews.get(user_id) {
            Some(preview) if preview.id == *id => {
                previews.remove(user_id);
                true
            }
            _ => false,
        }
    }

    /// Revokes the user's preview only if it belongs to `conversation_id`.
    pub fn revoke_for_conversation(
        &self,
        user_id: &UserId,
        conversation_id: &ConversationId,
    ) -> bool {
        let mut previews = self.lock();
        match previews.get(user_id) {
            Some(preview) if preview.conversation_id == *conversation_id => {
                previews.remove(user_id);
                true
            }
            _ => false,
        }
    }

    /// Number of live previews.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> PdfUpload {
        PdfUpload::new(Some(name), "application/pdf", b"%PDF".to_vec()).unwrap()
    }

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    #[test]
    fn publish_then_get() {
        let registry = PreviewRegistry::new();
        let id = registry.publish(&alice(), ConversationId::new(), &pdf("a.pdf"));

        let preview = registry.get(&alice(), &id).unwrap();
        assert_eq!(preview.file_name, "a.pdf");
        assert_eq!(preview.bytes.as_slice(), b"%PDF");
    }

    #[test]
    fn new_publish_revokes_previous_handle() {
        let registry = PreviewRegistry::new();
        let first = registry.publish(&alice(), ConversationId::new(), &pdf("a.pdf"));
        let second = registry.publish(&alice(), ConversationId::new(), &pdf("b.pdf"));

        assert!(registry.get(&alice(), &first).is_none());
        assert!(registry.get(&alice(), &second).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn other_users_cannot_read_a_preview() {
        let registry = PreviewRegistry::new();
        let id = registry.publish(&alice(), ConversationId::new(), &pdf("a.pdf"));

        assert!(registry.get(&UserId::new("bob").unwrap(), &id).is_none());
    }

    #[test]
    fn revoke_for_conversation_only_matches_its_conversation() {
        let registry = PreviewRegistry::new();
        let conv = ConversationId::new();
        registry.publish(&alice(), conv, &pdf("a.pdf"));

        assert!(!registry.revoke_for_conversation(&alice(), &ConversationId::new()));
        assert!(registry.revoke_for_conversation(&alice(), &conv));
        assert!(registry.is_empty());
    }

    #[test]
    fn revoke_handle_requires_current_handle_and_owner() {
        let registry = PreviewRegistry::new();
        let first = registry.publish(&alice(), ConversationId::new(), &pdf("a.pdf"));
        let second = registry.publish(&alice(), ConversationId::new(), &pdf("b.pdf"));

        assert!(!registry.revoke_handle(&alice(), &first));
        assert!(!registry.revoke_handle(&UserId::new("bob").unwrap(), &second));
        assert!(registry.revoke_handle(&alice(), &second));
        assert!(registry.is_empty());
    }

    #[test]
    fn revoke_removes_preview() {
        let registry = PreviewRegistry::new();
        registry.publish(&alice(), ConversationId::new(), &pdf("a.pdf"));

        assert!(registry.revoke(&alice()));
        assert!(!registry.revoke(&alice()));
    }
}
