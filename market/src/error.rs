use crate::marketplace::Currency;

/// Domain-specific error types for the auction house library.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// A raw value failed field-level validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A replacement bid did not exceed the current one.
    #[error("Bid amount must be greater than the existing bid of {current}")]
    BidTooLow { current: Currency },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Authentication failed")]
    Authentication,

    /// The caller asked for something its role does not allow
    /// (bidding on your own product, attaching delivery to someone else's bid).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A workflow invariant was broken by the caller. Never user-retriable.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The input stream closed while a prompt was waiting for a response.
    #[error("Unexpected end of input")]
    EndOfInput,

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MarketError {
    /// True for errors the console answers with a corrective message and a re-prompt.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::BidTooLow { .. } | Self::Duplicate(_)
        )
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience type alias.
pub type MarketResult<T> = Result<T, MarketError>;
