//! Sign-in credentials.
//!
//! Handlers convert raw form values into [`LoginCredentials`] before talking
//! to the [`LoginService`](crate::domain::ports::LoginService) port.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Reasons a sign-in payload is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroed on drop.
///
/// # Examples
/// ```
/// use grammable::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "password").unwrap();
/// assert_eq!(creds.username(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Hex-encoded SHA-256 digest of the password.
    pub fn password_digest(&self) -> String {
        password_digest(self.password.as_str())
    }
}

/// Hex-encoded SHA-256 digest of a plain-text password.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
