//! Username/password resolution.

use std::fmt;

use tracing::{debug, info};

use crate::error::CredentialError;
use crate::prompt::PasswordPrompt;
use crate::store::SecretStore;

/// Login credential for a single run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Current OS user, read from `USER`, `USERNAME` or `LOGNAME`.
#[must_use]
pub fn default_username() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
}

fn resolve_username(username: Option<&str>) -> Result<String, CredentialError> {
    match username {
        Some(name) => Ok(name.to_owned()),
        None => default_username().ok_or(CredentialError::NoUsername),
    }
}

/// Resolves credentials from a secret store, prompting on a miss.
pub struct CredentialResolver<'a> {
    store: &'a dyn SecretStore,
    prompt: &'a dyn PasswordPrompt,
    service: String,
}

impl<'a> CredentialResolver<'a> {
    /// Create a resolver over `store` using `service` as the secret namespace.
    #[must_use]
    pub fn new(
        store: &'a dyn SecretStore,
        prompt: &'a dyn PasswordPrompt,
        service: impl Into<String>,
    ) -> Self {
        Self {
            store,
            prompt,
            service: service.into(),
        }
    }

    /// Resolve the credential for `username`, defaulting to the OS user.
    ///
    /// A stored password is returned as-is. Otherwise the password is
    /// prompted for once and written to the store for future runs.
    ///
    /// # Errors
    ///
    /// Returns an error if no username can be determined, the store fails,
    /// or the prompt cannot be read.
    pub fn resolve(&self, username: Option<&str>) -> Result<Credential, CredentialError> {
        let username = resolve_username(username)?;

        if let Some(password) = self.store.get_secret(&self.service, &username)? {
            debug!(user = %username, service = %self.service, "Using stored password");
            return Ok(Credential { username, password });
        }

        let password = self.ask(&username)?;
        self.store.set_secret(&self.service, &username, &password)?;
        info!(user = %username, service = %self.service, "Stored password in secret store");

        Ok(Credential { username, password })
    }

    /// Prompt for a new password and overwrite the stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be read or the store fails.
    pub fn reset(&self, username: Option<&str>) -> Result<Credential, CredentialError> {
        let username = resolve_username(username)?;
        self.store.delete_secret(&self.service, &username)?;
        self.resolve(Some(&username))
    }

    fn ask(&self, username: &str) -> Result<String, CredentialError> {
        let password = self.prompt.prompt_password(username)?;
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword(username.to_owned()));
        }
        Ok(password)
    }
}
