//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, RelayEvent};
use crate::infrastructure::dto::websocket as dto;
use crate::usecase::SendMessageCommand;

// ========================================
// DTO → UseCase Command
// ========================================

impl From<dto::MessageEnvelope> for SendMessageCommand {
    fn from(dto: dto::MessageEnvelope) -> Self {
        Self {
            client_message_id: dto.id,
            text: dto.message,
            display_name: dto.alt_name,
            timestamp: dto.timestamp,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::ChatRecord {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            message: model.text.into_string(),
            alt_name: model.display_name.into_string(),
            timestamp: model.timestamp.into_string(),
        }
    }
}

impl From<RelayEvent> for dto::ServerEvent {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::History(messages) => {
                Self::ChatHistory(messages.into_iter().map(Into::into).collect())
            }
            RelayEvent::Message(message) => Self::Message(message.into()),
            RelayEvent::Error(message) => Self::Error(dto::ErrorPayload { message }),
        }
    }
}
