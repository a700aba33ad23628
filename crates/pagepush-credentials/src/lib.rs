//! Credential resolution for pagepush.
//!
//! This crate provides a [`CredentialResolver`] that turns an optional username
//! into a [`Credential`] by consulting a [`SecretStore`], prompting through a
//! [`PasswordPrompt`] on the first use of a username and persisting the answer.
//!
//! # Architecture
//!
//! - [`SecretStore`] trait with [`KeyringStore`] for the OS keychain
//! - [`PasswordPrompt`] trait with [`ConsolePrompt`] for hidden terminal input
//! - [`MemorySecretStore`] and [`ScriptedPrompt`] for testing (behind `mock` feature flag)
//!
//! Stored passwords are never validated against the server; a wrong password
//! surfaces later as an HTTP authentication error.

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod prompt;
mod resolver;
mod store;

pub use error::CredentialError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MemorySecretStore, ScriptedPrompt};
pub use prompt::{ConsolePrompt, PasswordPrompt};
pub use resolver::{Credential, CredentialResolver, default_username};
pub use store::{KeyringStore, SecretStore};
