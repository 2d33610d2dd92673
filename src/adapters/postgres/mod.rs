//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresConversationStore` - conversations and messages tables

mod conversation_store;

pub use conversation_store::PostgresConversationStore;
