//! HTTP client for the external identity store.
//!
//! Endpoints:
//! - `GET {base}/accounts/{id}/link` → 200 `{game_uuid, display_name}`,
//!   404 when the account has no linked game account.
//! - `GET {base}/accounts/{id}` → 200 `{admin: bool}`, 404 for unknown
//!   accounts (treated as "not an administrator").
//!
//! Link state is queried fresh on every call; it can change between
//! requests, so nothing here is cached.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::{AccountId, GameIdentity, IdentityError, IdentityStore};

#[derive(Debug, Deserialize)]
struct LinkDto {
    game_uuid: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    #[serde(default)]
    admin: bool,
}

pub struct HttpIdentityStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityStore {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, IdentityError> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| IdentityError::StoreUnavailable(e.to_string()))
    }
}

#[async_trait]
impl IdentityStore for HttpIdentityStore {
    async fn lookup_link(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<GameIdentity>, IdentityError> {
        let response = self
            .get(&format!("/accounts/{}/link", account_id.as_str()))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let link: LinkDto = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::StoreUnavailable(e.to_string()))?;
                Ok(Some(GameIdentity {
                    game_uuid: link.game_uuid,
                    display_name: link.display_name,
                }))
            }
            status => Err(IdentityError::StoreUnavailable(format!(
                "link lookup returned {status}"
            ))),
        }
    }

    async fn is_admin(&self, account_id: &AccountId) -> Result<bool, IdentityError> {
        let response = self
            .get(&format!("/accounts/{}", account_id.as_str()))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                let account: AccountDto = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::StoreUnavailable(e.to_string()))?;
                Ok(account.admin)
            }
            status => Err(IdentityError::StoreUnavailable(format!(
                "account lookup returned {status}"
            ))),
        }
    }
}
