//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `conversation` - Conversations, messages, and the two-phase exchange
//! - `document` - Validation of files submitted for upload

pub mod conversation;
pub mod document;
pub mod foundation;
