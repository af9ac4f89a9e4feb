//! CLI error types.

use texsnap_app::AppError;
use texsnap_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Markup could not be typeset")]
    Notation,

    #[error("{0}")]
    Validation(String),
}
