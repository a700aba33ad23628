//! CLI error types.

use std::path::PathBuf;

use pagepush_config::ConfigError;
use pagepush_confluence::WriteError;
use pagepush_credentials::CredentialError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("cannot read {}", path.display())]
    ReadContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Validation(String),
}
