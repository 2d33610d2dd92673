//! Conversation command and query handlers.
//!
//! Upload, exchange, and housekeeping operations over the conversation store
//! and the document source.

mod access;
mod delete_conversation;
mod export_conversation;
mod get_messages;
mod list_conversations;
mod quick_action;
mod send_message;
mod upload_document;

pub use access::ConversationAccessError;
pub use delete_conversation::{
    DeleteConversationCommand, DeleteConversationHandler, DeleteConversationResult,
};
pub use export_conversation::{ExportConversationHandler, ExportConversationQuery};
pub use get_messages::{GetMessagesHandler, GetMessagesQuery};
pub use list_conversations::{ListConversationsHandler, ListConversationsQuery};
pub use quick_action::{QuickActionCommand, QuickActionHandler};
pub use send_message::{ExchangeOutcome, SendMessageCommand, SendMessageHandler};
pub use upload_document::{
    UploadDocumentCommand, UploadDocumentError, UploadDocumentHandler, UploadDocumentResult,
};
