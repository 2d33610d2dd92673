//! Adapters - implementations of the port interfaces.
//!
//! - `chatpdf` - document source over the vendor's HTTP API
//! - `postgres` - conversation store on PostgreSQL
//! - `memory` - in-process conversation store
//! - `auth` - token validation and the identity service client
//! - `http` - axum REST API

pub mod auth;
pub mod chatpdf;
pub mod http;
pub mod memory;
pub mod postgres;

pub use chatpdf::{ChatPdfClient, ChatPdfConfig, MockDocumentSource};
pub use memory::InMemoryConversationStore;
pub use postgres::PostgresConversationStore;
