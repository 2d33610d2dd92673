//! Two-phase message exchange.
//!
//! An exchange starts as a pending user question. The vendor's response then
//! either confirms it (question and answer are persisted together) or rolls it
//! back (a local-only apology is produced and nothing is persisted).
//!
//! ```text
//! begin ──► PendingExchange ──confirm──► ConfirmedExchange  (2 rows persisted)
//!                         └──roll_back─► RolledBackExchange (local only)
//! ```

use super::prompts::APOLOGY_MESSAGE;
use super::{AssistantReply, Conversation, Message, SourceCitation, SourceId};
use crate::domain::foundation::ConversationId;

/// A question sent to the vendor whose reply has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    source_id: SourceId,
    question: Message,
}

impl PendingExchange {
    /// Starts an exchange on `conversation`.
    ///
    /// Returns `None` when the trimmed text is empty: blank input is a no-op.
    pub fn begin(conversation: &Conversation, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let question = Message::user(*conversation.id(), text).ok()?;
        Some(Self {
            source_id: conversation.source_id().clone(),
            question,
        })
    }

    pub fn conversation_id(&self) -> &ConversationId {
        self.question.conversation_id()
    }

    /// Vendor handle the question must be sent against.
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn question(&self) -> &Message {
        &self.question
    }

    /// Confirms the exchange with the vendor's reply.
    pub fn confirm(self, reply: AssistantReply) -> ConfirmedExchange {
        let (content, citations) = reply.into_parts();
        let answer = Message::answering(&self.question, content);
        ConfirmedExchange {
            question: self.question,
            answer,
            citations,
        }
    }

    /// Rolls the exchange back after a vendor failure.
    pub fn roll_back(self) -> RolledBackExchange {
        let apology = Message::answering(&self.question, APOLOGY_MESSAGE.to_string());
        RolledBackExchange {
            question: self.question,
            apology,
        }
    }
}

/// A question answered by the vendor, ready to be persisted as two rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedExchange {
    question: Message,
    answer: Message,
    citations: Vec<SourceCitation>,
}

impl ConfirmedExchange {
    pub fn question(&self) -> &Message {
        &self.question
    }

    pub fn answer(&self) -> &Message {
        &self.answer
    }

    pub fn citations(&self) -> &[SourceCitation] {
        &self.citations
    }

    /// The rows to write, question first.
    pub fn rows(&self) -> [Message; 2] {
        [self.question.clone(), self.answer.clone()]
    }
}

/// A question the vendor failed to answer. Neither message is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledBackExchange {
    question: Message,
    apology: Message,
}

impl RolledBackExchange {
    pub fn question(&self) -> &Message {
        &self.question
    }

    pub fn apology(&self) -> &Message {
        &self.apology
    }
}
