//! Conversation domain module.
//!
//! A conversation pairs one uploaded document with its chat history.
//! Exchanges are modelled as a two-phase write: a pending question is either
//! confirmed by the vendor's reply or rolled back to a local apology.

mod conversation;
mod exchange;
mod message;
mod prompts;
mod source;
mod transcript;

pub use conversation::{sort_newest_first, Conversation};
pub use exchange::{ConfirmedExchange, PendingExchange, RolledBackExchange};
pub use message::{sort_oldest_first, Message, Role};
pub use prompts::{
    suggested_questions, welcome_for, QuickAction, Welcome, APOLOGY_MESSAGE, SUGGESTED_QUESTIONS,
};
pub use source::{AssistantReply, SourceCitation, SourceId};
pub use transcript::{render_transcript, ExportFormat, Transcript};
