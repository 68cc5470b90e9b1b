//! Input script error types.

/// Errors that can occur when loading or saving an input script.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Failed to read the script from disk.
    #[error("failed to read input script: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the script to disk.
    #[error("failed to write input script: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse input script: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the script to RON.
    #[error("failed to serialize input script: {0}")]
    SerializeError(#[source] ron::Error),
}
