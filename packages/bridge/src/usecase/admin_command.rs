//! UseCase: run an arbitrary administrator console command.

use std::sync::Arc;

use crate::domain::{AccountId, CommandChannel, IdentityStore};

use super::error::GateError;

/// Fallback text when the console accepts a command but returns no output.
const EMPTY_RESPONSE_TEXT: &str = "Command executed successfully";

/// Authorizes a session against the administrator allow-list and delegates
/// the command verbatim to the command channel — no chat formatting and no
/// escaping, by design: administrators may run arbitrary console commands.
pub struct AdminCommandUseCase {
    identity_store: Arc<dyn IdentityStore>,
    command_channel: Arc<dyn CommandChannel>,
}

impl AdminCommandUseCase {
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        command_channel: Arc<dyn CommandChannel>,
    ) -> Self {
        Self {
            identity_store,
            command_channel,
        }
    }

    pub async fn execute(
        &self,
        session: Option<AccountId>,
        command: &str,
    ) -> Result<String, GateError> {
        let Some(account_id) = session else {
            return Err(GateError::Unauthenticated);
        };
        if !self.identity_store.is_admin(&account_id).await? {
            tracing::warn!(
                "Rejected admin command from non-admin account '{}'",
                account_id.as_str()
            );
            return Err(GateError::Forbidden);
        }

        if command.trim().is_empty() {
            return Err(GateError::EmptyCommand);
        }

        tracing::info!(
            "Admin '{}' executing command: {}",
            account_id.as_str(),
            command
        );
        let response = self
            .command_channel
            .execute(command)
            .await
            .map_err(GateError::Channel)?;

        if response.is_empty() {
            Ok(EMPTY_RESPONSE_TEXT.to_string())
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommandError, GameIdentity, IdentityError};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct ScriptedCommandChannel {
        result: Result<String, CommandError>,
        commands: Mutex<Vec<String>>,
    }

    impl ScriptedCommandChannel {
        fn responding(response: &str) -> Self {
            Self {
                result: Ok(response.to_string()),
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

    /// Identity store with a single admin account "42".
    struct SingleAdminStore;

    #[async_trait]
    impl IdentityStore for SingleAdminStore {
        async fn lookup_link(
            &self,
            _account_id: &AccountId,
        ) -> Result<Option<GameIdentity>, IdentityError> {
            Ok(None)
        }
        async fn is_admin(&self, account_id: &AccountId) -> Result<bool, IdentityError> {
            Ok(account_id.as_str() == "42")
        }
    }

    fn create_usecase(
        channel: ScriptedCommandChannel,
    ) -> (AdminCommandUseCase, Arc<ScriptedCommandChannel>) {
        let channel = Arc::new(channel);
        let usecase = AdminCommandUseCase::new(Arc::new(SingleAdminStore), channel.clone());
        (usecase, channel)
    }

    #[tokio::test]
    async fn test_admin_command_passes_through_verbatim() {
        // given:
        let (usecase, channel) = create_usecase(ScriptedCommandChannel::responding("Seed: [42]"));

        // when:
        let result = usecase
            .execute(Some(AccountId::new("42")), r#"say "hello there""#)
            .await
            .unwrap();

        // then: no escaping, no reformatting
        assert_eq!(result, "Seed: [42]");
        let commands = channel.commands.lock().await;
        assert_eq!(commands.as_slice(), [r#"say "hello there""#]);
    }

    #[tokio::test]
    async fn test_empty_console_response_gets_fallback_text() {
        // given:
        let (usecase, _) = create_usecase(ScriptedCommandChannel::responding(""));

        // when:
        let result = usecase
            .execute(Some(AccountId::new("42")), "save-all")
            .await
            .unwrap();

        // then:
        assert_eq!(result, "Command executed successfully");
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden_and_channel_untouched() {
        // given:
        let (usecase, channel) = create_usecase(ScriptedCommandChannel::responding("ignored"));

        // when:
        let result = usecase.execute(Some(AccountId::new("1001")), "stop").await;

        // then: zero channel invocations
        assert!(matches!(result, Err(GateError::Forbidden)));
        assert!(channel.commands.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthenticated() {
        // given:
        let (usecase, channel) = create_usecase(ScriptedCommandChannel::responding("ignored"));

        // when:
        let result = usecase.execute(None, "stop").await;

        // then:
        assert!(matches!(result, Err(GateError::Unauthenticated)));
        assert!(channel.commands.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_command_rejected_after_authorization() {
        // given:
        let (usecase, channel) = create_usecase(ScriptedCommandChannel::responding("ignored"));

        // when:
        let result = usecase.execute(Some(AccountId::new("42")), "  ").await;

        // then:
        assert!(matches!(result, Err(GateError::EmptyCommand)));
        assert!(channel.commands.lock().await.is_empty());
    }
}
