use std::fmt::{Debug, Formatter};
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidAdminCredentialsError {
    #[error("The admin username is empty")]
    EmptyUsername,
    #[error("The admin username contains ':'")]
    UsernameContainsColon,
    #[error("The admin password is empty")]
    EmptyPassword,
}

/// The fixed username and password pair that guards comment deletion.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: String, password: String) -> Result<Self, InvalidAdminCredentialsError> {
        // Basic auth splits user and password on the first ':'.
        if username.is_empty() {
            Err(InvalidAdminCredentialsError::EmptyUsername)
        } else if username.contains(':') {
            Err(InvalidAdminCredentialsError::UsernameContainsColon)
        } else if password.is_empty() {
            Err(InvalidAdminCredentialsError::EmptyPassword)
        } else {
            Ok(Self { username, password })
        }
    }

    /// Compares both parts without short-circuiting on the first mismatch.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_matches = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_matches = self.password.as_bytes().ct_eq(password.as_bytes());

        (username_matches & password_matches).into()
    }
}

impl Debug for AdminCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}
