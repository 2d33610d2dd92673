//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate the domain over the ports. `ChatSession` composes
//! them into the per-user client-state controller, and `PreviewRegistry`
//! scopes preview handles to their owner.

pub mod handlers;
pub mod preview;
pub mod session;

pub use handlers::conversation::{
    ConversationAccessError, ExchangeOutcome, UploadDocumentError,
};
pub use preview::{PreviewFile, PreviewRegistry};
pub use session::{ChatSession, DeliveryStatus, TranscriptEntry};
