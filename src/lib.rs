//! docchat - chat with uploaded PDF documents.
//!
//! A PDF is uploaded to a third-party document chat service, which returns an
//! opaque source id. Each upload opens a conversation; questions are sent to
//! the service with that source id and both sides of every exchange are
//! stored in PostgreSQL.
//!
//! Layout:
//! - `domain` - conversations, messages, exchanges, upload validation
//! - `ports` - traits for the store, the document service and authentication
//! - `application` - command/query handlers and the per-user `ChatSession`
//! - `adapters` - PostgreSQL, in-memory, vendor HTTP, auth and axum adapters
//! - `config` - typed environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
