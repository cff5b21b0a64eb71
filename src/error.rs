use thiserror::Error;

/// Failures surfaced by the codec and its file driver.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact ends before its declared header")]
    TruncatedHeader,

    #[error("malformed artifact header: {reason}")]
    MalformedHeader { reason: &'static str },

    /// Priority queue underflow while merging tree nodes. Indicates a
    /// builder bug, never a bad artifact.
    #[error("priority queue underflow in tree builder")]
    EmptyHeap,

    #[error("symbol code exceeds 255 bits")]
    CodeTooLong,
}

pub type Result<T> = std::result::Result<T, CodecError>;
