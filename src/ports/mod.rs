//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationStore` - conversations and messages persistence
//! - `DocumentSource` - the remote conversational-PDF service
//! - `SessionValidator` - Bearer token validation
//! - `AuthProvider` - email/password sign-in and sign-up

mod auth_provider;
mod conversation_store;
mod document_source;
mod session_validator;

pub use auth_provider::{AuthProvider, AuthSession, Credentials, SignUpOutcome};
pub use conversation_store::ConversationStore;
pub use document_source::{DocumentSource, DocumentSourceError};
pub use session_validator::SessionValidator;
