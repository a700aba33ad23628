//! Secret store abstraction.

use crate::error::CredentialError;

/// Persistent password storage keyed by service namespace and account.
pub trait SecretStore {
    /// Look up a stored password.
    ///
    /// Returns `Ok(None)` when no entry exists for the account.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] if the backend cannot be read.
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError>;

    /// Store a password, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] if the backend cannot be written.
    fn set_secret(&self, service: &str, account: &str, value: &str) -> Result<(), CredentialError>;

    /// Remove a stored password. Missing entries are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Store`] if the backend cannot be written.
    fn delete_secret(&self, service: &str, account: &str) -> Result<(), CredentialError>;
}

/// OS keychain backend (Keychain, Secret Service, Credential Manager).
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry(service: &str, account: &str) -> Result<keyring::Entry, CredentialError> {
        keyring::Entry::new(service, account).map_err(|source| store_error(account, source))
    }
}

impl SecretStore for KeyringStore {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError> {
        match Self::entry(service, account)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(source) => Err(store_error(account, source)),
        }
    }

    fn set_secret(&self, service: &str, account: &str, value: &str) -> Result<(), CredentialError> {
        Self::entry(service, account)?
            .set_password(value)
            .map_err(|source| store_error(account, source))
    }

    fn delete_secret(&self, service: &str, account: &str) -> Result<(), CredentialError> {
        match Self::entry(service, account)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(source) => Err(store_error(account, source)),
        }
    }
}

fn store_error(account: &str, source: keyring::Error) -> CredentialError {
    CredentialError::Store {
        account: account.to_owned(),
        source,
    }
}
