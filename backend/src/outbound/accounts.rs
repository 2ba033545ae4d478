//! Static account list implementing the `LoginService` port.
//!
//! Accounts are supplied at startup as username, user id and SHA-256 password
//! digest. There is no registration flow.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId, password_digest};

const DEVELOPMENT_PASSWORD: &str = "password";
const ALICE_ID: Uuid = Uuid::from_u128(0x5b1e_a11c_e000_4000_8000_0000_0000_0001);
const BOB_ID: Uuid = Uuid::from_u128(0x5b1e_0b0b_0000_4000_8000_0000_0000_0002);

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password_digest: String,
}

/// In-memory account directory.
///
/// # Examples
/// ```
/// use grammable::outbound::accounts::StaticAccounts;
///
/// let accounts = StaticAccounts::builder()
///     .with_account("carol", uuid::Uuid::nil(), "s3cret")
///     .build();
/// assert!(accounts.user_id("carol").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticAccounts {
    accounts: HashMap<String, Account>,
}

impl StaticAccounts {
    pub fn builder() -> StaticAccountsBuilder {
        StaticAccountsBuilder::default()
    }

    /// The development pair: `alice` and `bob`, both with password `password`.
    pub fn development() -> Self {
        Self::builder()
            .with_account("alice", ALICE_ID, DEVELOPMENT_PASSWORD)
            .with_account("bob", BOB_ID, DEVELOPMENT_PASSWORD)
            .build()
    }

    /// Id of the named account, if any.
    pub fn user_id(&self, username: &str) -> Option<UserId> {
        self.accounts
            .get(username)
            .map(|account| account.user_id.clone())
    }
}

/// Builder for [`StaticAccounts`].
#[derive(Debug, Default)]
pub struct StaticAccountsBuilder {
    accounts: HashMap<String, Account>,
}

impl StaticAccountsBuilder {
    /// Add an account with a plain-text password; only its digest is kept.
    #[must_use]
    pub fn with_account(mut self, username: &str, user_id: Uuid, password: &str) -> Self {
        self.accounts.insert(
            username.to_owned(),
            Account {
                user_id: UserId::from_uuid(user_id),
                password_digest: password_digest(password),
            },
        );
        self
    }

    pub fn build(self) -> StaticAccounts {
        StaticAccounts {
            accounts: self.accounts,
        }
    }
}

#[async_trait]
impl LoginService for StaticAccounts {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let offered = credentials.password_digest();
        match self.accounts.get(credentials.username()) {
            Some(account) if account.password_digest == offered => Ok(account.user_id.clone()),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}
