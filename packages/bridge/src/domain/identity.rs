//! Identity resolution: mapping a web session to a linked game account.
//!
//! The identity store itself (OAuth accounts, game-account links, admin
//! flags) is an external service. The bridge only needs two questions
//! answered per request, expressed by the [`IdentityStore`] trait; the
//! concrete client lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// External account id carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A linked game account, as stored by the identity store.
///
/// A read-only snapshot taken per request; link state can change between
/// requests, so this is never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdentity {
    pub game_uuid: String,
    pub display_name: String,
}

/// Outcome of resolving a session to a game identity.
///
/// "Not found" is a normal result variant here, not a fault; only transport
/// failures talking to the store surface as [`IdentityError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Identity(GameIdentity),
    /// No session credential was presented at all.
    NotAuthenticated,
    /// The session is valid but no game account is linked to it.
    NotLinked,
}

/// Failure talking to the identity store.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Narrow contract against the external identity store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up the game account linked to an external account, if any.
    async fn lookup_link(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<GameIdentity>, IdentityError>;

    /// Whether the external account is flagged as an administrator.
    async fn is_admin(&self, account_id: &AccountId) -> Result<bool, IdentityError>;
}

/// Resolve an optional session credential to a game identity.
pub async fn resolve(
    store: &dyn IdentityStore,
    session: Option<&AccountId>,
) -> Result<Resolution, IdentityError> {
    let Some(account_id) = session else {
        return Ok(Resolution::NotAuthenticated);
    };
    match store.lookup_link(account_id).await? {
        Some(identity) => Ok(Resolution::Identity(identity)),
        None => Ok(Resolution::NotLinked),
    }
}
