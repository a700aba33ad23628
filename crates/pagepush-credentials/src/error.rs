//! Error types for credential resolution.

/// Error while resolving login credentials.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CredentialError {
    /// The OS secret store could not be accessed.
    #[error("secret store error for '{account}'")]
    Store {
        /// Account (username) the lookup was for.
        account: String,
        /// Underlying keychain error.
        #[source]
        source: keyring::Error,
    },

    /// Reading the password from the terminal failed.
    #[error("failed to read password")]
    Prompt(#[from] std::io::Error),

    /// No username given and none could be derived from the environment.
    #[error("no username given and the current OS user could not be determined")]
    NoUsername,

    /// The entered password was empty.
    #[error("password for '{0}' must not be empty")]
    EmptyPassword(String),
}
