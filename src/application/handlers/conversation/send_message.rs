//! SendMessageHandler - the two-phase message exchange.
//!
//! A blank question is a no-op. Otherwise the question is sent to the
//! document source with the conversation's own source id. A reply confirms
//! the exchange and both messages are stored in one batch; a failure rolls
//! it back to a local apology and nothing is stored.

use std::sync::Arc;
use tracing::{debug, error, warn};

use super::access::{load_owned, ConversationAccessError};
use crate::domain::conversation::{Conversation, Message, PendingExchange, SourceCitation};
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::{ConversationStore, DocumentSource, DocumentSourceError};

/// Command to ask a question in a conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub content: String,
}

/// What a send produced.
///
/// Exactly one user message then exactly one assistant message (reply or
/// apology) is produced for every non-skipped send.
#[derive(Debug, Clone)]
pub enum ExchangeOutcome {
    /// Blank input; nothing happened.
    Skipped,

    /// The document source answered.
    Answered {
        question: Message,
        answer: Message,
        citations: Vec<SourceCitation>,
        /// False when the reply arrived but the messages could not be stored.
        persisted: bool,
    },

    /// The document source failed; `apology` is local only.
    Failed {
        question: Message,
        apology: Message,
        error: DocumentSourceError,
    },
}

impl ExchangeOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ExchangeOutcome::Skipped)
    }

    /// The (question, reply-or-apology) pair, if anything was exchanged.
    pub fn messages(&self) -> Option<(&Message, &Message)> {
        match self {
            ExchangeOutcome::Skipped => None,
            ExchangeOutcome::Answered {
                question, answer, ..
            } => Some((question, answer)),
            ExchangeOutcome::Failed {
                question, apology, ..
            } => Some((question, apology)),
        }
    }
}

/// Handler for message exchanges.
#[derive(Clone)]
pub struct SendMessageHandler {
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn ConversationStore>,
}

impl SendMessageHandler {
    pub fn new(source: Arc<dyn DocumentSource>, store: Arc<dyn ConversationStore>) -> Self {
        Self { source, store }
    }

    /// Loads the conversation, checks ownership, and runs the exchange.
    ///
    /// Blank content is skipped before the conversation is even loaded.
    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<ExchangeOutcome, ConversationAccessError> {
        if cmd.content.trim().is_empty() {
            return Ok(ExchangeOutcome::Skipped);
        }

        let conversation =
            load_owned(self.store.as_ref(), &cmd.conversation_id, &cmd.user_id).await?;
        Ok(self.exchange(&conversation, &cmd.content).await)
    }

    /// Runs one exchange on a conversation the caller already holds.
    pub async fn exchange(&self, conversation: &Conversation, text: &str) -> ExchangeOutcome {
        let Some(pending) = PendingExchange::begin(conversation, text) else {
            return ExchangeOutcome::Skipped;
        };

        debug!(
            conversation_id = %pending.conversation_id(),
            source_id = %pending.source_id(),
            "Sending question"
        );

        match self
            .source
            .chat(pending.source_id(), pending.question().content())
            .await
        {
            Ok(reply) => {
                let confirmed = pending.confirm(reply);
                let persisted = match self.store.insert_messages(&confirmed.rows()).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(
                            conversation_id = %conversation.id(),
                            error = %e,
                            "Failed to store exchange; reply delivered unsaved"
                        );
                        false
                    }
                };

                ExchangeOutcome::Answered {
                    question: confirmed.question().clone(),
                    answer: confirmed.answer().clone(),
                    citations: confirmed.citations().to_vec(),
                    persisted,
                }
            }
            Err(e) => {
                warn!(
                    conversation_id = %conversation.id(),
                    error = %e,
                    "Document source failed to answer"
                );
                let rolled_back = pending.roll_back();
                ExchangeOutcome::Failed {
                    question: rolled_back.question().clone(),
                    apology: rolled_back.apology().clone(),
                    error: e,
                }
            }
        }
    }
}
