//! UseCase: deliver a browser-originated chat message into the game.
//!
//! The ordering here is deliberate: the message is broadcast to browsers
//! only after the game server has accepted it. A failed delivery is never
//! broadcast, so the browsers and the game world cannot disagree about
//! what was said.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    AccountId, ChatBroadcaster, ChatMessage, CommandChannel, IdentityStore, MessageKind,
    MessageSource, Resolution, resolve,
};

use super::error::SendError;

/// Format the in-game broadcast command for a resolved sender.
///
/// The name and body are embedded as JSON string literals via serde_json,
/// so quotes or backslashes in user text cannot break out of the command's
/// structure and reach the console as anything but literal text.
fn format_broadcast_command(display_name: &str, body: &str) -> String {
    let components = serde_json::json!([
        { "text": format!("<{display_name}> "), "color": "aqua", "bold": true },
        { "text": body, "color": "white" },
    ]);
    format!("tellraw @a {components}")
}

/// Resolves the sender's game identity, delivers the message over the
/// command channel and, only on success, fans it out locally so the sender
/// sees their own message without waiting for the game to echo it back.
pub struct SendChatUseCase {
    identity_store: Arc<dyn IdentityStore>,
    command_channel: Arc<dyn CommandChannel>,
    broadcaster: Arc<dyn ChatBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        command_channel: Arc<dyn CommandChannel>,
        broadcaster: Arc<dyn ChatBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity_store,
            command_channel,
            broadcaster,
            clock,
        }
    }

    pub async fn execute(
        &self,
        session: Option<AccountId>,
        body: &str,
    ) -> Result<ChatMessage, SendError> {
        if body.trim().is_empty() {
            return Err(SendError::EmptyMessage);
        }

        let identity = match resolve(self.identity_store.as_ref(), session.as_ref()).await? {
            Resolution::Identity(identity) => identity,
            Resolution::NotAuthenticated => return Err(SendError::Unauthenticated),
            Resolution::NotLinked => return Err(SendError::AccountNotLinked),
        };

        let command = format_broadcast_command(&identity.display_name, body);
        self.command_channel
            .execute(&command)
            .await
            .map_err(SendError::DeliveryFailed)?;

        let message = ChatMessage::new(
            MessageKind::Chat,
            identity.display_name,
            body.to_string(),
            self.clock.now_millis(),
            MessageSource::Web,
        );
        let delivered = self.broadcaster.broadcast(&message).await;
        tracing::info!(
            "Relayed web message from '{}' in-game and to {} clients",
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
    use crate::domain::{
        BroadcastHandle, CommandError, ConnectionId, GameIdentity, IdentityError,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    struct RecordingBroadcaster {
        messages: Mutex<Vec<ChatMessage>>,
    }

    #[async_trait]
    impl ChatBroadcaster for RecordingBroadcaster {
        async fn register(&self, _sender: BroadcastHandle) -> ConnectionId {
            ConnectionId::generate()
        }
        async fn unregister(&self, _id: &ConnectionId) {}
        async fn broadcast(&self, message: &ChatMessage) -> usize {
            self.messages.lock().await.push(message.clone());
            1
        }
        async fn connection_count(&self) -> usize {
            1
        }
    }

    /// Scripted command channel that records every executed command.
    struct ScriptedCommandChannel {
        result: Result<String, CommandError>,
        commands: Mutex<Vec<String>>,
    }

    impl ScriptedCommandChannel {
        fn succeeding() -> Self {
            Self {
                result: Ok(String::new()),
                commands: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: CommandError) -> Self {
            Self {
                result: Err(error),
                commands: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandChannel for ScriptedCommandChannel {
        async fn execute(&self, command: &str) -> Result<String, CommandError> {
            self.commands.lock().await.push(command.to_string());
            self.result.clone()
        }
    }

    struct FakeIdentityStore {
        links: HashMap<String, GameIdentity>,
    }

    impl FakeIdentityStore {
        fn with_link(account: &str, name: &str) -> Self {
            let mut links = HashMap::new();
            links.insert(
                account.to_string(),
                GameIdentity {
                    game_uuid: "069a79f4-44e9-4726-a5be-fca90e38aaf5".to_string(),
                    display_name: name.to_string(),
                },
            );
            Self { links }
        }
    }

    #[async_trait]
    impl IdentityStore for FakeIdentityStore {
        async fn lookup_link(
            &self,
            account_id: &AccountId,
        ) -> Result<Option<GameIdentity>, IdentityError> {
            Ok(self.links.get(account_id.as_str()).cloned())
        }
        async fn is_admin(&self, _account_id: &AccountId) -> Result<bool, IdentityError> {
            Ok(false)
        }
    }

    fn create_usecase(
        channel: ScriptedCommandChannel,
    ) -> (
        SendChatUseCase,
        Arc<ScriptedCommandChannel>,
        Arc<RecordingBroadcaster>,
    ) {
        let channel = Arc::new(channel);
        let broadcaster = Arc::new(RecordingBroadcaster {
            messages: Mutex::new(Vec::new()),
        });
        let usecase = SendChatUseCase::new(
            Arc::new(FakeIdentityStore::with_link("1001", "Ann")),
            channel.clone(),
            broadcaster.clone(),
            Arc::new(FixedClock::new(1700000000000)),
        );
        (usecase, channel, broadcaster)
    }

    #[tokio::test]
    async fn test_send_success_broadcasts_after_delivery() {
        // given:
        let (usecase, channel, broadcaster) = create_usecase(ScriptedCommandChannel::succeeding());

        // when:
        let result = usecase
            .execute(Some(AccountId::new("1001")), "hello world")
            .await
            .unwrap();

        // then: the command went out with the resolved display name
        let commands = channel.commands.lock().await;
        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with("tellraw @a "));
        assert!(commands[0].contains("<Ann> "));

        // and the unescaped original was broadcast
        let broadcasts = broadcaster.messages.lock().await;
        assert_eq!(broadcasts.len(), 1);
        assert_eq!(broadcasts[0].author, "Ann");
        assert_eq!(broadcasts[0].body, "hello world");
        assert_eq!(broadcasts[0].source, MessageSource::Web);
        assert_eq!(result.body, "hello world");
    }

    #[tokio::test]
    async fn test_send_empty_message_rejected() {
        // given:
        let (usecase, channel, _) = create_usecase(ScriptedCommandChannel::succeeding());

        // when:
        let result = usecase.execute(Some(AccountId::new("1001")), "   ").await;

        // then:
        assert!(matches!(result, Err(SendError::EmptyMessage)));
        assert!(channel.commands.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_without_session_is_unauthenticated() {
        // given:
        let (usecase, channel, _) = create_usecase(ScriptedCommandChannel::succeeding());

        // when:
        let result = usecase.execute(None, "hello").await;

        // then:
        assert!(matches!(result, Err(SendError::Unauthenticated)));
        assert!(channel.commands.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_unlinked_account_is_rejected() {
        // given:
        let (usecase, channel, _) = create_usecase(ScriptedCommandChannel::succeeding());

        // when:
        let result = usecase.execute(Some(AccountId::new("9999")), "hello").await;

        // then:
        assert!(matches!(result, Err(SendError::AccountNotLinked)));
        assert!(channel.commands.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_delivery_failure_never_broadcasts() {
        // given:
        let (usecase, _, broadcaster) = create_usecase(ScriptedCommandChannel::failing(
            CommandError::ConnectFailed("connection refused".to_string()),
        ));

        // when:
        let result = usecase.execute(Some(AccountId::new("1001")), "hello").await;

        // then: the failure is surfaced and zero broadcasts happened
        assert!(matches!(result, Err(SendError::DeliveryFailed(_))));
        assert!(broadcaster.messages.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_quotes_cannot_break_out_of_the_command() {
        // given:
        let (usecase, channel, broadcaster) = create_usecase(ScriptedCommandChannel::succeeding());
        let body = r#"He said "hi" and left a \"#;

        // when:
        usecase
            .execute(Some(AccountId::new("1001")), body)
            .await
            .unwrap();

        // then: the command's JSON argument parses back to one literal string
        let commands = channel.commands.lock().await;
        let json_arg = commands[0].strip_prefix("tellraw @a ").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(json_arg).unwrap();
        assert_eq!(parsed[1]["text"], body);

        // and browsers see the raw, unescaped text
        assert_eq!(broadcaster.messages.lock().await[0].body, body);
    }

    #[test]
    fn test_format_broadcast_command_plain() {
        // given / when:
        let command = format_broadcast_command("Ann", "hello");

        // then:
        assert_eq!(
            command,
            r#"tellraw @a [{"bold":true,"color":"aqua","text":"<Ann> "},{"color":"white","text":"hello"}]"#
        );
    }
}
