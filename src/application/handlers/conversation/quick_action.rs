//! QuickActionHandler - sends a canned prompt as a normal exchange.

use super::access::ConversationAccessError;
use super::send_message::{ExchangeOutcome, SendMessageCommand, SendMessageHandler};
use crate::domain::conversation::QuickAction;
use crate::domain::foundation::{ConversationId, UserId};

/// Command to run a quick action on a conversation.
#[derive(Debug, Clone)]
pub struct QuickActionCommand {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub action: QuickAction,
}

/// Handler for quick actions.
#[derive(Clone)]
pub struct QuickActionHandler {
    send: SendMessageHandler,
}

impl QuickActionHandler {
    pub fn new(send: SendMessageHandler) -> Self {
        Self { send }
    }

    pub async fn handle(
        &self,
        cmd: QuickActionCommand,
    ) -> Result<ExchangeOutcome, ConversationAccessError> {
        self.send
            .handle(SendMessageCommand {
                user_id: cmd.user_id,
                conversation_id: cmd.conversation_id,
                content: cmd.action.prompt().to_string(),
            })
            .await
    }
}
