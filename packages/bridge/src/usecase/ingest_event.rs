//! UseCase: ingest a game-originated webhook event and fan it out.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{ChatBroadcaster, ChatMessage, MessageKind, MessageSource};
use crate::infrastructure::dto::http::WebhookPayload;

use super::error::IngestError;

/// Validates a pushed game event, normalizes it into a [`ChatMessage`] and
/// broadcasts it to every connected browser.
pub struct IngestEventUseCase {
    broadcaster: Arc<dyn ChatBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl IngestEventUseCase {
    pub fn new(broadcaster: Arc<dyn ChatBroadcaster>, clock: Arc<dyn Clock>) -> Self {
        Self { broadcaster, clock }
    }

    /// Ingestion succeeds once the event is structurally valid; how many
    /// browsers were actually reachable does not affect the result.
    pub async fn execute(&self, payload: WebhookPayload) -> Result<ChatMessage, IngestError> {
        let body = match &payload.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => return Err(IngestError::MissingMessage),
        };

        let message = ChatMessage::new(
            MessageKind::from_event_type(payload.event_type.as_deref()),
            payload.author(),
            body,
            self.clock.now_millis(),
            MessageSource::Game,
        );

        let delivered = self.broadcaster.broadcast(&message).await;
        tracing::info!(
            "Ingested '{}' event from '{}', delivered to {} clients",
            message.kind.as_str(),
            message.author,
            delivered
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::{BroadcastHandle, ConnectionId};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Records every broadcast message instead of delivering it.
    struct RecordingBroadcaster {
        messages: Mutex<Vec<ChatMessage>>,
    }

    impl RecordingBroadcaster {
        fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBroadcaster for RecordingBroadcaster {
        async fn register(&self, _sender: BroadcastHandle) -> ConnectionId {
            ConnectionId::generate()
        }

        async fn unregister(&self, _id: &ConnectionId) {}

        async fn broadcast(&self, message: &ChatMessage) -> usize {
            self.messages.lock().await.push(message.clone());
            0
        }

        async fn connection_count(&self) -> usize {
            0
        }
    }

    fn create_usecase() -> (IngestEventUseCase, Arc<RecordingBroadcaster>) {
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let usecase = IngestEventUseCase::new(
            broadcaster.clone(),
            Arc::new(FixedClock::new(1700000000000)),
        );
        (usecase, broadcaster)
    }

    fn payload(json: &str) -> WebhookPayload {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_ingest_broadcasts_normalized_message() {
        // given:
        let (usecase, broadcaster) = create_usecase();

        // when:
        let result = usecase
            .execute(payload(
                r#"{"player":{"displayName":"Ann","name":"ann123"},"message":"hello","type":"chat"}"#,
            ))
            .await
            .unwrap();

        // then:
        assert_eq!(result.author, "Ann");
        assert_eq!(result.body, "hello");
        assert_eq!(result.kind, MessageKind::Chat);
        assert_eq!(result.source, MessageSource::Game);
        assert_eq!(result.occurred_at, 1700000000000);

        let broadcasts = broadcaster.messages.lock().await;
        assert_eq!(broadcasts.len(), 1);
        assert_eq!(broadcasts[0], result);
    }

    #[tokio::test]
    async fn test_ingest_succeeds_with_zero_reachable_clients() {
        // given: RecordingBroadcaster always reports zero deliveries
        let (usecase, _) = create_usecase();

        // when:
        let result = usecase
            .execute(payload(r#"{"player":"Bob","message":"hi"}"#))
            .await;

        // then:
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_ingest_rejects_missing_message() {
        // given:
        let (usecase, broadcaster) = create_usecase();

        // when:
        let result = usecase.execute(payload(r#"{"player":"Bob"}"#)).await;

        // then: rejected, and nothing was broadcast
        assert!(matches!(result, Err(IngestError::MissingMessage)));
        assert!(broadcaster.messages.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_message() {
        // given:
        let (usecase, _) = create_usecase();

        // when:
        let result = usecase
            .execute(payload(r#"{"player":"Bob","message":""}"#))
            .await;

        // then:
        assert!(matches!(result, Err(IngestError::MissingMessage)));
    }

    #[tokio::test]
    async fn test_ingest_server_event_defaults_author() {
        // given:
        let (usecase, _) = create_usecase();

        // when:
        let result = usecase
            .execute(payload(r#"{"message":"Restarting in 5 minutes","type":"system"}"#))
            .await
            .unwrap();

        // then:
        assert_eq!(result.author, "Server");
        assert_eq!(result.kind, MessageKind::System);
    }

    #[tokio::test]
    async fn test_ingest_join_event_maps_kind() {
        // given:
        let (usecase, _) = create_usecase();

        // when:
        let result = usecase
            .execute(payload(
                r#"{"player":"Bob","message":"Bob joined the game","type":"join"}"#,
            ))
            .await
            .unwrap();

        // then:
        assert_eq!(result.kind, MessageKind::Join);
    }
}
