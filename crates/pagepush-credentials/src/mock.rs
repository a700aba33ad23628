//! In-memory credential backends for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::CredentialError;
use crate::prompt::PasswordPrompt;
use crate::store::SecretStore;

/// In-memory secret store that counts writes.
///
/// # Example
///
/// ```ignore
/// use pagepush_credentials::{MemorySecretStore, SecretStore};
///
/// let store = MemorySecretStore::new().with_secret("confluence_script", "alice", "pw");
/// assert_eq!(store.get_secret("confluence_script", "alice")?, Some("pw".to_owned()));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    values: Mutex<HashMap<(String, String), String>>,
    writes: AtomicUsize,
}

impl MemorySecretStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without counting it as a write.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_secret(self, service: &str, account: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert((service.to_owned(), account.to_owned()), value.to_owned());
        self
    }

    /// Number of `set_secret` calls made so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SecretStore for MemorySecretStore {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError> {
        Ok(self
            .values
            .lock()
            .unwrap()
            .get(&(service.to_owned(), account.to_owned()))
            .cloned())
    }

    fn set_secret(&self, service: &str, account: &str, value: &str) -> Result<(), CredentialError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .unwrap()
            .insert((service.to_owned(), account.to_owned()), value.to_owned());
        Ok(())
    }

    fn delete_secret(&self, service: &str, account: &str) -> Result<(), CredentialError> {
        self.values
            .lock()
            .unwrap()
            .remove(&(service.to_owned(), account.to_owned()));
        Ok(())
    }
}

/// Prompt that answers from a fixed list and counts how often it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    /// Create a prompt that returns `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: AtomicUsize::new(0),
        }
    }

    /// Number of times a password was requested.
    pub fn prompt_count(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl PasswordPrompt for ScriptedPrompt {
    fn prompt_password(&self, _username: &str) -> std::io::Result<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}
