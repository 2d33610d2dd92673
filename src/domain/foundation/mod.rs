//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, auth types, and error types
//! that form the vocabulary of the docchat domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationId, MessageId, PreviewId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
