//! Error types for rendering and configuration.

use std::io;

use thiserror::Error;

/// Errors surfaced by the rendering engine and its configuration layer.
///
/// Rendering itself never fails for well-formed calls: degenerate budgets,
/// empty containers and cycles all have a defined bounded output. The variants
/// here cover API misuse, custom renderers that give up, and configuration
/// input that cannot be parsed.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A child render was requested with no top-level render in progress.
    #[error(
        "render_child() must be called within render(); use render() as the top-level entry point"
    )]
    NoActiveRender,

    /// A custom renderer or protocol hook reported a failure.
    #[error("renderer failed: {0}")]
    Failed(String),

    /// An allocation policy name that is neither `greedy` nor `even`.
    #[error("invalid policy: {0:?} (expected \"greedy\" or \"even\")")]
    InvalidPolicy(String),

    /// Malformed configuration input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error while reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    /// Build a [`RenderError::Failed`] from any message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
